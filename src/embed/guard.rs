use crate::configuration::EmbedSettings;
use crate::embed::attribution::{referer, user_agent};
use crate::embed::referrer::{Denial, ReferrerPolicy, Verdict};
use actix_web::HttpRequest;

/// Applies the referrer policy to incoming requests.
#[derive(Clone, Debug)]
pub struct EmbedGuard {
    policy: ReferrerPolicy,
    log_violations: bool,
    gate_submissions: bool,
}

impl From<&EmbedSettings> for EmbedGuard {
    fn from(settings: &EmbedSettings) -> Self {
        Self {
            policy: settings.referrer_policy(),
            log_violations: settings.log_violations,
            gate_submissions: settings.gate_submissions,
        }
    }
}

impl EmbedGuard {
    pub fn gates_submissions(&self) -> bool {
        self.gate_submissions
    }

    /// Applies the policy to the request's referrer without logging.
    pub fn evaluate(&self, request: &HttpRequest) -> Result<(), Denial> {
        match self.policy.evaluate(referer(request.headers())) {
            Verdict::Admitted => Ok(()),
            Verdict::Denied(denial) => Err(denial),
        }
    }

    /// Checks the request's referrer, logging the denial when configured to.
    pub fn check(&self, request: &HttpRequest) -> Result<(), Denial> {
        self.evaluate(request).inspect_err(|denial| {
            if self.log_violations {
                log_violation(request, denial, self.policy.allowed_referers());
            }
        })
    }

    pub fn admits(&self, request: &HttpRequest) -> bool {
        self.check(request).is_ok()
    }
}

pub fn requested_url(request: &HttpRequest) -> String {
    let connection_info = request.connection_info();
    format!(
        "{}://{}{}",
        connection_info.scheme(),
        connection_info.host(),
        request.uri()
    )
}

/// Absolute URL of the submission endpoint on the host the request was sent to.
pub fn api_url(request: &HttpRequest) -> String {
    let connection_info = request.connection_info();
    format!(
        "{}://{}/api/magazine-users",
        connection_info.scheme(),
        connection_info.host()
    )
}

fn log_violation(request: &HttpRequest, denial: &Denial, allowed_referers: &[String]) {
    let ip = request.connection_info().peer_addr().map(str::to_string);
    let user_agent = user_agent(request.headers());
    let url = requested_url(request);

    match denial {
        Denial::MissingReferer => tracing::warn!(
            ip = ?ip,
            user_agent = ?user_agent,
            url = %url,
            "Embed request blocked: {}",
            denial.reason()
        ),
        Denial::InvalidReferer { referer } => tracing::warn!(
            referrer = %referer,
            ip = ?ip,
            user_agent = ?user_agent,
            url = %url,
            "Embed request blocked: {}",
            denial.reason()
        ),
        Denial::DomainNotAllowed { referer, host } => tracing::warn!(
            referrer_domain = %host,
            referrer = %referer,
            ip = ?ip,
            user_agent = ?user_agent,
            url = %url,
            allowed_referers = ?allowed_referers,
            "Embed request blocked: {}",
            denial.reason()
        ),
    }
}
