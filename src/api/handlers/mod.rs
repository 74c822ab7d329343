pub mod health;
pub use self::health::health;

pub mod swift_codes;
pub use self::swift_codes::{
    create_swift_code, delete_swift_code, get_swift_code, get_swift_codes_by_country,
};
