pub mod server;

use crate::cli::globals::DbConfig;

#[derive(Debug)]
pub enum Action {
    Server { port: u16, db: DbConfig },
}
