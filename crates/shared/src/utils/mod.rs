mod generators;
mod logs;
mod random_string;

pub use self::generators::{
    ORDER_NUMBER_LENGTH, ORDER_NUMBER_PREFIX, generate_order_number, get_uuid, now,
};
pub use self::logs::init_logger;
pub use self::random_string::{ALPHANUMERIC, UPPER_ALPHANUMERIC, generate_random_string};
