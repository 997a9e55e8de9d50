use url::Url;

/// Allow-list of domains that may embed the subscription surfaces.
#[derive(Clone, Debug, Default)]
pub struct ReferrerPolicy {
    allowed_referers: Vec<String>,
    bypass: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Verdict {
    Admitted,
    Denied(Denial),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Denial {
    MissingReferer,
    InvalidReferer { referer: String },
    DomainNotAllowed { referer: String, host: String },
}

impl Denial {
    pub fn reason(&self) -> &'static str {
        match self {
            Denial::MissingReferer => "Missing referrer header",
            Denial::InvalidReferer { .. } => "Invalid referrer format",
            Denial::DomainNotAllowed { .. } => "Referrer domain not allowed",
        }
    }
}

impl ReferrerPolicy {
    /// Blank entries are dropped, the rest trimmed and lowercased.
    pub fn new(allowed_referers: &[String], bypass: bool) -> Self {
        let allowed_referers = allowed_referers
            .iter()
            .map(|domain| domain.trim().to_lowercase())
            .filter(|domain| !domain.is_empty())
            .collect();

        Self {
            allowed_referers,
            bypass,
        }
    }

    pub fn allowed_referers(&self) -> &[String] {
        &self.allowed_referers
    }

    pub fn evaluate(&self, referer: Option<&str>) -> Verdict {
        if self.allowed_referers.is_empty() || self.bypass {
            return Verdict::Admitted;
        }

        let Some(referer) = referer else {
            return Verdict::Denied(Denial::MissingReferer);
        };

        let Some(host) = referer_host(referer) else {
            return Verdict::Denied(Denial::InvalidReferer {
                referer: referer.to_string(),
            });
        };

        if self
            .allowed_referers
            .iter()
            .any(|pattern| domain_matches(&host, pattern))
        {
            Verdict::Admitted
        } else {
            Verdict::Denied(Denial::DomainNotAllowed {
                referer: referer.to_string(),
                host,
            })
        }
    }
}

pub fn validate(referer: Option<&str>, policy: &ReferrerPolicy) -> bool {
    policy.evaluate(referer) == Verdict::Admitted
}

/// Lowercased host of an absolute URL, `None` for anything without one.
pub fn referer_host(referer: &str) -> Option<String> {
    Url::parse(referer)
        .ok()?
        .host_str()
        .filter(|host| !host.is_empty())
        .map(str::to_lowercase)
}

/// `*.example.com` matches `example.com` itself as well as any subdomain.
fn domain_matches(host: &str, pattern: &str) -> bool {
    let host = host.to_lowercase();
    let pattern = pattern.to_lowercase();

    if host == pattern {
        return true;
    }

    match pattern.strip_prefix("*.") {
        Some(base) => host == base || host.ends_with(&format!(".{}", base)),
        None => false,
    }
}
