use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("swift-codes")
        .about("REST API for bank SWIFT-code records")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("SWIFT_API_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("db-user")
                .long("db-user")
                .help("Database user")
                .env("SWIFT_API_DB_USER")
                .required(true),
        )
        .arg(
            Arg::new("db-password")
                .long("db-password")
                .help("Database password")
                .env("SWIFT_API_DB_PASSWORD")
                .required(true),
        )
        .arg(
            Arg::new("db-host")
                .long("db-host")
                .help("Database host")
                .env("SWIFT_API_DB_HOST")
                .required(true),
        )
        .arg(
            Arg::new("db-port")
                .long("db-port")
                .help("Database port")
                .default_value("5432")
                .env("SWIFT_API_DB_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("db-name")
                .long("db-name")
                .help("Database name")
                .env("SWIFT_API_DB_NAME")
                .required(true),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("SWIFT_API_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}
