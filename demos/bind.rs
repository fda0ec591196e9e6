use std::sync::OnceLock;

use dragon_bind::bind::HookError;
use dragon_bind::{Bind, Config, FieldDescriptor, Schema};
use tracing_subscriber::{fmt, EnvFilter};

dragon_bind::config_enum! {
    enum Direction {
        Outbound,
        Inbound,
    }
}

#[derive(Debug, Default)]
struct PluginSettings {
    name: String,
    threads: u16,
    direction: Direction,
    ports: Vec<u16>,
    endpoint: String,
    ip: String,
    port: String,
    verbose: bool,
}

impl PluginSettings {
    fn split_endpoint(&mut self) -> Result<(), HookError> {
        let (ip, port) = self
            .endpoint
            .split_once(':')
            .ok_or_else(|| format!("Tcp = {} is not correct (ip:port)", self.endpoint))?;
        self.ip = ip.to_string();
        self.port = port.to_string();
        Ok(())
    }
}

impl Bind for PluginSettings {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: OnceLock<Schema<PluginSettings>> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::new()
                .field("Name", FieldDescriptor::new(), |s: &mut Self, v: String| s.name = v)
                .field(
                    "Threads",
                    FieldDescriptor::new().with_default(1),
                    |s: &mut Self, v: u16| s.threads = v,
                )
                .field(
                    "Direction",
                    FieldDescriptor::new().with_error_suffix("(use Outbound or Inbound)"),
                    |s: &mut Self, v: Direction| s.direction = v,
                )
                .field(
                    "Ports",
                    FieldDescriptor::new().with_delimiter(','),
                    |s: &mut Self, v: Vec<u16>| s.ports = v,
                )
                .field(
                    "Endpoint",
                    FieldDescriptor::new().with_post_load(Self::split_endpoint),
                    |s: &mut Self, v: String| s.endpoint = v,
                )
                .field(
                    "Verbose",
                    FieldDescriptor::optional(),
                    |s: &mut Self, v: bool| s.verbose = v,
                )
        })
    }
}

fn main() -> Result<(), dragon_bind::Error> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    // File values first, then DEMO__plugSettings__TestPlugin_* overrides.
    let config = Config::builder()
        .with_file("demos/plugin.toml", true)
        .with_env("DEMO", "__")
        .build()?;

    let settings: PluginSettings = config.resolve(Some("TestPlugin"), "plugSettings")?;

    println!(
        "{} ({:?}, {} threads, verbose={})",
        settings.name, settings.direction, settings.threads, settings.verbose
    );
    println!("ports: {:?}", settings.ports);
    println!("endpoint: {} port {}", settings.ip, settings.port);

    Ok(())
}
