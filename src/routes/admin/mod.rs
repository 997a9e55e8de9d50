pub mod authenticate;
pub mod logout;
pub mod magazine_users;
