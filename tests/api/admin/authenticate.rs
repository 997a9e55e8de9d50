use crate::helpers::spawn_app;
use magazine_api::utils::ResponseErrorMessage;

#[tokio::test]
async fn anonymous_visitors_are_not_authenticated() {
    let app = spawn_app().await;

    let response = app.get_authenticate().await;

    assert_eq!(401, response.status().as_u16());
    let response_body: ResponseErrorMessage = response.json().await.unwrap();
    assert_eq!("Authentication required.", response_body.error);
}

#[tokio::test]
async fn logged_in_admins_are_authenticated() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;

    let response = app.get_authenticate().await;

    assert_eq!(200, response.status().as_u16());
}
