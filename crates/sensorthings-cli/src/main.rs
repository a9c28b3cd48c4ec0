//! # SensorThings CLI
//!
//! Command-line utilities for inspecting SensorThings payloads and resource URLs.

use anyhow::{bail, Context, Result};
use sensorthings_core::{
    Datastream, Decoded, Entity, EntityType, FeatureOfInterest, HistoricalLocation, Id, Link,
    Location, Observation, ObservedProperty, PropertyOutcome, SensorThingsService, Sensor, Thing,
};
use sensorthings_dao::{decode_id, encode_id, Dao};
use std::env;
use std::io::Read;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod config;

use config::CliConfig;

/// Run `$func::<Entity>(args..)` for the entity type named by `$kind`.
macro_rules! for_kind {
    ($kind:expr, $func:ident($($arg:expr),*)) => {
        match $kind {
            EntityType::Datastream | EntityType::Datastreams => $func::<Datastream>($($arg),*),
            EntityType::FeatureOfInterest | EntityType::FeaturesOfInterest => {
                $func::<FeatureOfInterest>($($arg),*)
            }
            EntityType::HistoricalLocation | EntityType::HistoricalLocations => {
                $func::<HistoricalLocation>($($arg),*)
            }
            EntityType::Location | EntityType::Locations => $func::<Location>($($arg),*),
            EntityType::Observation | EntityType::Observations => $func::<Observation>($($arg),*),
            EntityType::ObservedProperty | EntityType::ObservedProperties => {
                $func::<ObservedProperty>($($arg),*)
            }
            EntityType::Sensor | EntityType::Sensors => $func::<Sensor>($($arg),*),
            EntityType::Thing | EntityType::Things => $func::<Thing>($($arg),*),
        }
    };
}

fn main() -> Result<()> {
    let config = CliConfig::from_env()?;

    let filter = match &config.log_filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    let service = Arc::new(SensorThingsService::new(config.endpoint.clone()));
    tracing::debug!(endpoint = %service.endpoint(), "Using service");

    match args[1].as_str() {
        "inspect" => {
            if args.len() < 4 {
                eprintln!("Usage: sta inspect <Type> <file|->");
                std::process::exit(1);
            }
            let kind = parse_kind(&args[2])?;
            let body = read_input(&args[3])?;
            for_kind!(kind, inspect(&service, &body))?;
        }
        "page" => {
            if args.len() < 4 {
                eprintln!("Usage: sta page <Type> <file|->");
                std::process::exit(1);
            }
            let kind = parse_kind(&args[2])?;
            let body = read_input(&args[3])?;
            for_kind!(kind, page(&service, &body))?;
        }
        "url" => {
            if args.len() < 3 {
                eprintln!("Usage: sta url <Type> [id]");
                std::process::exit(1);
            }
            let kind = parse_kind(&args[2])?;
            let id = args.get(3).map(|raw| parse_id(raw));
            for_kind!(kind, url(&service, id.as_ref()))?;
        }
        "encode-id" => {
            if args.len() < 3 {
                eprintln!("Usage: sta encode-id <id>");
                std::process::exit(1);
            }
            println!("{}", encode_id(&parse_id(&args[2])));
        }
        "help" | "--help" | "-h" => {
            print_help();
        }
        cmd => {
            eprintln!("Unknown command: {cmd}");
            print_help();
            std::process::exit(1);
        }
    }

    Ok(())
}

fn parse_kind(name: &str) -> Result<EntityType> {
    match EntityType::by_name(name) {
        Some(kind) => Ok(kind),
        None => bail!("Unknown entity type: {name}"),
    }
}

/// Integers and quoted strings decode as usual; anything else is a string id.
fn parse_id(raw: &str) -> Id {
    decode_id(raw).unwrap_or_else(|_| Id::from(raw))
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("Failed to read stdin")?;
        Ok(body)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))
    }
}

fn inspect<E: Entity + std::fmt::Display>(
    service: &Arc<SensorThingsService>,
    body: &str,
) -> Result<()> {
    let Decoded {
        mut entity,
        outcomes,
    } = Dao::<E>::new(Arc::clone(service))
        .decode_entity(body)
        .with_context(|| format!("Failed to decode {}", E::KIND))?;

    println!("{entity}");
    println!("{}", serde_json::to_string_pretty(&entity)?);
    for list in entity.navigation_lists_mut() {
        if let Some(count) = list.count() {
            println!("{}: count {count}", list.entity_type());
        }
        if let Some(next) = list.next_link() {
            println!("{}: next {}", list.entity_type(), absolute(service, next));
        }
    }
    print_outcomes(&outcomes);
    Ok(())
}

fn page<E: Entity + std::fmt::Display>(
    service: &Arc<SensorThingsService>,
    body: &str,
) -> Result<()> {
    let decoded = Dao::<E>::new(Arc::clone(service))
        .decode_page(body)
        .with_context(|| format!("Failed to decode {}", E::KIND.plural()))?;

    let list = &decoded.entity;
    println!("{}: {} returned", list.entity_type(), list.len());
    if let Some(count) = list.count() {
        println!("count: {count}");
    }
    if let Some(next) = list.next_link() {
        println!("next: {}", absolute(service, next));
    }
    for entity in list {
        println!("  {entity}");
    }
    print_outcomes(&decoded.outcomes);
    Ok(())
}

fn url<E: Entity>(service: &Arc<SensorThingsService>, id: Option<&Id>) -> Result<()> {
    let dao = Dao::<E>::new(Arc::clone(service));
    let url = match id {
        Some(id) => dao.entity_url(id)?,
        None => dao.collection_url()?,
    };
    println!("{url}");
    Ok(())
}

/// The link resolved against the service root, or as received if it cannot be.
fn absolute(service: &SensorThingsService, link: &Link) -> String {
    match link.resolve(service.endpoint()) {
        Ok(url) => url.to_string(),
        Err(err) => {
            tracing::debug!(%link, error = %err, "Cannot resolve link");
            link.to_string()
        }
    }
}

fn print_outcomes(outcomes: &[PropertyOutcome]) {
    for PropertyOutcome { name, outcome } in outcomes {
        println!("{name}: {outcome}");
    }
}

fn print_help() {
    println!(
        r#"SensorThings CLI

USAGE:
    sta <COMMAND> [OPTIONS]

COMMANDS:
    inspect <Type> <file|->  Decode one entity and report each namespaced property
    page <Type> <file|->     Decode an entity-set response
    url <Type> [id]          Print the collection URL, or the entity URL for an id
    encode-id <id>           Encode an id for use in a resource path
    help                     Show this help message

ENVIRONMENT:
    STA_ENDPOINT  Service root (default: {endpoint})
    STA_LOG       Log filter, overrides RUST_LOG

EXAMPLES:
    sta inspect FeatureOfInterest foi.json
    curl -s $STA_ENDPOINT/Things | sta page Things -
    sta url Datastreams 42
    sta encode-id "o'neil"
"#,
        endpoint = config::DEFAULT_ENDPOINT
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_from_arguments() {
        assert_eq!(parse_id("42"), Id::Long(42));
        assert_eq!(parse_id("'42'"), Id::from("42"));
        assert_eq!(parse_id("abc"), Id::from("abc"));
    }

    #[test]
    fn kinds_accept_singular_and_plural() {
        assert_eq!(parse_kind("Thing").unwrap(), EntityType::Thing);
        assert_eq!(parse_kind("Things").unwrap(), EntityType::Things);
        assert!(parse_kind("things").is_err());
    }

    #[test]
    fn next_links_print_as_urls() {
        let service = SensorThingsService::parse("http://x/v1.1").unwrap();
        let relative = Link::parse("Observations?$skip=100").unwrap();
        assert_eq!(
            absolute(&service, &relative),
            "http://x/v1.1/Observations?$skip=100"
        );
        let full = Link::parse("https://y/Things").unwrap();
        assert_eq!(absolute(&service, &full), "https://y/Things");
    }

    #[test]
    fn url_for_each_kind() {
        let service = Arc::new(SensorThingsService::parse("http://x/v1.1").unwrap());
        for kind in EntityType::ALL {
            assert!(for_kind!(kind, url(&service, None)).is_ok());
        }
    }
}
