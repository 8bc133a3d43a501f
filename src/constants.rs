use lazy_static::lazy_static;
use url::Url;

pub mod domains {
    pub const INDIEGALA: &str = "https://www.indiegala.com";
}

pub mod paths {
    pub const LOGIN: &str = "login";
    /// Landing page used to surface the site's security check after a rejected session
    pub const SECURITY_CHECK: &str = "library";
    pub const SHOWCASE: &str = "library/showcase";
    pub const USER_INFO: &str = "login_new/user_info";
    pub const LEGACY_SHOWCASE: &str = "showcase_collection";
    pub const LEGACY_USER_INFO: &str = "get_user_info";
}

pub mod markers {
    /// Injected by the Incapsula bot mitigation layer
    pub const ANTI_BOT_CHALLENGE: &str = "_Incapsula_Resource";
    pub const PROFILE_LOCKED: &str = "Profile locked";
    pub const SHOWCASE_EMPTY: &str = "Your showcase list is empty";
}

pub mod selectors {
    pub const SHOWCASE_TITLE_CLASS: &str = "library-showcase-title";
    pub const USERNAME_CLASS: &str = "username-text";
    pub const LEGACY_ITEM_DELIMITER: &str = "<div class=\"col-xs-4\">\r\n\t\t\t\t\t";
}

pub const PLATFORM: &str = "indiegala";
pub const LEGACY_SESSION_COOKIE: &str = "auth";
pub const DEFAULT_MAX_PAGES: u32 = 500;
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) GOG Galaxy";

lazy_static! {
    pub static ref INDIEGALA_URL: Url = Url::parse(domains::INDIEGALA).unwrap();
}
