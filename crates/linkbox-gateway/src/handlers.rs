mod health;
mod redirect;
mod url;

pub use self::health::health_handler;
pub use self::redirect::redirect_handler;
pub use self::url::{create_url_handler, delete_url_handler, expand_url_handler, stats_url_handler};
