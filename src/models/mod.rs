mod magazine_user;
mod pagination;
mod source_stats;
mod user;

pub use magazine_user::{MagazineUser, MagazineUserAPI, MagazineUserForm, PER_PAGE, StoreError};
pub use pagination::Page;
pub use source_stats::{SourceCount, SourceStats};
pub use user::{NewUser, NewUserData};
