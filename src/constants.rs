/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 7/9/24
******************************************************************************/

pub(crate) const APP_ID_HEADER_KEY: &str = "x-ig-app-id";
pub(crate) const CSRF_HEADER_KEY: &str = "X-CSRFToken";
pub(crate) const CSRF_COOKIE_KEY: &str = "csrftoken=";

pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:139.0) Gecko/20100101 Firefox/139.0";

pub const DEFAULT_BASE_URL: &str = "https://i.instagram.com/api/v1";
pub const PROFILE_URL_PREFIX: &str = "https://www.instagram.com/";

pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub(crate) const DEFAULT_PAGE_DELAY_MS: u64 = 1000;
pub(crate) const DEFAULT_ACCOUNT_DELAY_MS: u64 = 2000;
pub(crate) const DEFAULT_MAX_PAGE_SIZE: u32 = 50;

pub(crate) const CAPTION_MAX_CHARS: usize = 70;
pub(crate) const CAPTION_ELLIPSIS: &str = "...";
pub(crate) const BODY_PREVIEW_CHARS: usize = 200;

pub const UNAVAILABLE: &str = "No Disponible";
pub const YES: &str = "Sí";
pub const NO: &str = "No";
pub const NO_DATE: &str = "N/A";
pub const NO_CAPTION: &str = "No caption";
pub const NO_MEDIA_URL: &str = "No media URL";
pub const POST_DATE_FORMAT: &str = "%d/%m/%Y";

pub const USER_NOT_FOUND_MESSAGE: &str = "Usuario no encontrado";
