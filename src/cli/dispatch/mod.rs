use crate::cli::{actions::Action, globals::DbConfig};
use anyhow::Result;
use secrecy::SecretString;

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let required = |name: &str| -> Result<String> {
        matches
            .get_one::<String>(name)
            .map(String::to_string)
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --{name}"))
    };

    Ok(Action::Server {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
        db: DbConfig {
            user: required("db-user")?,
            password: SecretString::from(required("db-password")?),
            host: required("db-host")?,
            port: matches.get_one::<u16>("db-port").copied().unwrap_or(5432),
            name: required("db-name")?,
        },
    })
}
