use clap::{Parser, Subcommand};
use fxhash::FxHashMap;
use std::path::PathBuf;
use tilestyle::{
    composition::{compose, GroupKind, LayerKind},
    core::viewport::resolution_for_zoom,
    FeatureView, SourceConfig, StyleOptions, StyleResolver,
};

/// Command-line inspector for the composed basemap style
#[derive(Parser)]
#[command(name = "tilestyle-app")]
#[command(about = "Inspect the tilestyle basemap style", long_about = None)]
struct Args {
    /// Style options JSON (thresholds, road scaling, source)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the layer stack in paint order
    Layers,
    /// Print the MapLibre style document
    Style {
        /// Tiles URL overriding the configured source
        url: Option<String>,
    },
    /// Resolve the directive for one feature
    Resolve {
        layer: String,
        class: Option<String>,
        /// Zoom level; omitted means unknown resolution
        zoom: Option<f64>,
    },
    /// Evaluate the label rules for one feature
    Label {
        layer: String,
        class: String,
        zoom: f64,
        rank: Option<f64>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let options = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            log::info!("Using style options from {}", path.display());
            StyleOptions::from_json(&json)?
        }
        None => StyleOptions::default(),
    };

    match args.command.unwrap_or(Command::Layers) {
        Command::Layers => print_layers(),
        Command::Style { url } => {
            let source = match url {
                Some(url) => SourceConfig {
                    url,
                    ..options.source.clone()
                },
                None => options.source.clone(),
            };
            println!("{}", compose().to_style_document(&source).to_json()?);
        }
        Command::Resolve { layer, class, zoom } => {
            let class = class.as_deref().filter(|c| !c.is_empty());
            let resolver = StyleResolver::from_options(&options);
            let feature = FeatureView::new(&layer, class);
            let resolution = zoom.map(resolution_for_zoom);
            let directive = resolver.resolve(&feature, resolution);
            log::debug!("{:?} at {:?} m/px -> {:?}", feature, resolution, directive);
            println!("{}", serde_json::to_string_pretty(&directive)?);
        }
        Command::Label {
            layer,
            class,
            zoom,
            rank,
        } => {
            let mut feature = FeatureView::new(&layer, Some(class.as_str())).with_name(&class);
            if let Some(rank) = rank {
                feature = feature.with_rank(rank);
            }
            let states: serde_json::Map<String, serde_json::Value> = compose()
                .layers()
                .filter_map(|rule| {
                    let state = rule.symbol_state(&feature, zoom)?;
                    state
                        .visible
                        .then(|| (rule.id.clone(), serde_json::json!(state)))
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&states)?);
        }
    }

    Ok(())
}

fn print_layers() {
    let composition = compose();
    let mut kinds: FxHashMap<LayerKind, usize> = FxHashMap::default();
    for kind in GroupKind::ALL {
        let Some(group) = composition.group(kind) else {
            continue;
        };
        println!("# {} ({} rules)", kind.name(), group.rules.len());
        for rule in &group.rules {
            *kinds.entry(rule.kind()).or_default() += 1;
            println!("{:<24} {}", rule.id, rule.kind().as_str());
        }
    }
    let mut totals: Vec<_> = kinds.into_iter().collect();
    totals.sort_by_key(|(kind, _)| kind.as_str());
    let summary: Vec<String> = totals
        .iter()
        .map(|(kind, count)| format!("{} {}", count, kind.as_str()))
        .collect();
    println!("# {} layers: {}", composition.len(), summary.join(", "));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_layers() {
        let args = Args::try_parse_from(["tilestyle-app"]).unwrap();
        assert!(args.command.is_none());
        assert!(args.config.is_none());
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let argv = ["tilestyle-app", "resolve", "water", "lake", "--config", "o.json"];
        let args = Args::try_parse_from(argv).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("o.json")));
        match args.command {
            Some(Command::Resolve { layer, class, zoom }) => {
                assert_eq!(layer, "water");
                assert_eq!(class.as_deref(), Some("lake"));
                assert_eq!(zoom, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_label_arguments() {
        let argv = ["tilestyle-app", "label", "poi", "museum", "15", "3"];
        let args = Args::try_parse_from(argv).unwrap();
        match args.command {
            Some(Command::Label { zoom, rank, .. }) => {
                assert_eq!(zoom, 15.0);
                assert_eq!(rank, Some(3.0));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_label_requires_zoom() {
        assert!(Args::try_parse_from(["tilestyle-app", "label", "poi", "museum"]).is_err());
        assert!(Args::try_parse_from(["tilestyle-app", "resolve", "water", "lake", "x"]).is_err());
    }
}
