pub mod attribution;
mod guard;
pub mod referrer;
pub mod templates;

pub use guard::{EmbedGuard, api_url, requested_url};
pub use referrer::{Denial, ReferrerPolicy, Verdict, validate};
