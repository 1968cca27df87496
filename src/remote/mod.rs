mod model;
pub use self::model::to_write_request;
pub use self::model::Datapoint;
pub use self::model::Label;
pub use self::model::TimeSeries;
pub use self::model::TsList;

mod config;
pub use self::config::Config;
pub use self::config::ConfigOption;
pub use self::config::DEFAULT_REMOTE_WRITE_URL;

mod client;
pub use self::client::Client;
pub use self::client::WriteOptions;
pub use self::client::WriteResult;

mod error;
pub use self::error::WriteError;

pub mod prompb;
