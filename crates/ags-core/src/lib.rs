pub mod cfn;
pub mod config;
pub mod error;
pub mod synth;

pub use cfn::Template;
pub use config::{DnsTemplateConfig, TemplateConfig};
pub use synth::{synthesize, synthesize_dns};
