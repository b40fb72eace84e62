// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
pub mod extract;
pub mod service;

pub use error::Error;
pub use extract::ReportParser;
pub use service::{ShoreTempService, TemperatureSource};
