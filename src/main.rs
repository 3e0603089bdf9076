use clap::Parser;
use ripe_atlas::config::{Command, MeasureArgs};
use ripe_atlas::core::ConfigProvider;
use ripe_atlas::utils::logger;
use ripe_atlas::utils::validation::{validate_non_empty_string, validate_required_field, Validate};
use ripe_atlas::{AtlasConfig, CliConfig, Client, ReqwestTransport};

type AtlasClient = Client<ReqwestTransport, AtlasConfig>;

async fn cmd_ip(client: &AtlasClient, probe_id: Option<u32>) -> ripe_atlas::Result<String> {
    let probe_id = probe_id
        .filter(|id| *id != 0)
        .or_else(|| client.config().default_probe());
    let probe_id = validate_required_field("probe ID or probes.default_probe", &probe_id)?;

    let probe = client.get_probe(*probe_id).await?;
    Ok(probe.ip_summary())
}

async fn cmd_measure(client: &AtlasClient, args: &MeasureArgs) -> ripe_atlas::Result<String> {
    validate_non_empty_string("target", &args.target)?;

    let mut request = client.new_measurement();
    request.try_add_definition(args.definition_fields())?;

    let created = client.submit(args.measurement_type, &request).await?;
    let ids: Vec<String> = created.measurements.iter().map(u64::to_string).collect();
    Ok(format!("Measurement IDs: {}", ids.join(", ")))
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI config: {:?}", cli.command);

    let mut config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Unable to load configuration: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    if let Command::Measure(args) = &cli.command {
        args.apply_probe_overrides(&mut config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let client = Client::new(ReqwestTransport::new(), config);

    let outcome = match &cli.command {
        Command::Ip { probe_id } => cmd_ip(&client, *probe_id).await,
        Command::Measure(args) => cmd_measure(&client, args).await,
    };

    match outcome {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::error!("❌ Command failed: {}", e);
            if e.is_local() {
                tracing::debug!("Nothing was sent to the API");
            }
            eprintln!("err: {}", e);
            std::process::exit(1);
        }
    }
}
