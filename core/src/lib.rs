extern crate env_logger;
extern crate getrandom;
extern crate log;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;

pub mod config;
pub mod controller;
pub mod count;
pub mod effect;
pub mod headless;
pub mod post;
pub mod search_result;
pub mod seed;
pub mod task;
pub mod theme;

pub use config::FeedConfig;
pub use controller::FeedController;
pub use effect::Effect;
pub use task::Task;
pub use theme::Theme;

use std::io::Write;

pub fn init_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .try_init();
}
