pub mod api;
pub mod redirect;
pub mod registry;

pub use api::ApiService;
pub use redirect::RedirectService;
pub use registry::{CODE_LENGTH, CodeSource, RandomCodeSource, ShortLinkRegistry};
