//! CLI for tileregion
//!
//! A thin wrapper around the library for checking tile templates, quadkeys
//! and region boundaries from a shell.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tileregion::{
    layers::LayerCatalog,
    region::validate_boundary,
    tiles::custom::resolver_from_config,
    ui::CursorInfo,
    LatLng, QuadKey, RegionConfig, RegionPolygon, TileCoord, TileTemplate,
};

#[derive(Parser, Debug)]
#[command(
    name = "tileregion",
    about = "Resolve tile URLs and prepare download regions",
    version
)]
struct Args {
    /// JSON configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Never contact the server for {custom:..} lookups
    #[arg(long, global = true)]
    offline: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a URL template for one tile
    Url {
        template: String,
        z: u8,
        x: i64,
        y: i64,
    },
    /// Encode a tile as a quadkey, or decode one with --decode
    Quadkey {
        #[arg(required_unless_present = "decode", num_args = 3, value_names = ["Z", "X", "Y"])]
        tile: Vec<i64>,
        /// Symbols to use instead of 0-3
        #[arg(long)]
        alphabet: Option<String>,
        #[arg(long, conflicts_with = "tile")]
        decode: Option<String>,
    },
    /// Describe the location under a cursor
    Info {
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lng: f64,
        /// Map zoom; defaults to the configured `default_zoom`
        zoom: Option<u8>,
    },
    /// Build a region from `lat,lon` points and print its boundary string
    Region {
        /// Points in drawing order
        #[arg(required = true, allow_hyphen_values = true)]
        points: Vec<String>,
        /// Decimal places in the boundary string
        #[arg(long)]
        precision: Option<usize>,
        /// Also report whether this `lat,lon` lies inside the region
        #[arg(long, allow_hyphen_values = true)]
        contains: Option<String>,
    },
    /// List the switcher entries for a layers JSON document
    Layers {
        file: PathBuf,
        /// Server root prefixed to cache and proxy URLs
        #[arg(long, default_value = "")]
        base: String,
        /// Reach reference layers through the server's tile proxy
        #[arg(long)]
        proxy: bool,
        /// Tile used to show a sample URL per entry, as z/x/y
        #[arg(long, default_value = "2/1/1")]
        sample: String,
    },
}

fn lib<T>(result: tileregion::Result<T>) -> Result<T> {
    result.map_err(|e| anyhow::anyhow!(e))
}

fn load_config(args: &Args) -> Result<RegionConfig> {
    let mut config = match &args.config {
        Some(path) => lib(RegionConfig::from_file(path))
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => RegionConfig::default(),
    };
    if args.offline {
        config.custom = None;
    }
    Ok(config)
}

fn parse_point(text: &str) -> Result<LatLng> {
    let (lat, lng) = text
        .split_once(',')
        .with_context(|| format!("Expected lat,lon, got {:?}", text))?;
    Ok(LatLng::new(lat.trim().parse()?, lng.trim().parse()?))
}

fn parse_tile(text: &str) -> Result<TileCoord> {
    let parts: Vec<&str> = text.split('/').collect();
    let [z, x, y] = parts.as_slice() else {
        bail!("Expected z/x/y, got {:?}", text);
    };
    Ok(TileCoord::new(x.parse()?, y.parse()?, z.parse()?))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "warn" };
    tileregion::init_logging(log_level);

    let config = load_config(&args)?;
    log::debug!("using config {:?}", config);

    match &args.command {
        Command::Url { template, z, x, y } => {
            let resolver = lib(resolver_from_config(config.custom.as_ref()))?;
            let template = TileTemplate::parse(template);
            match template.try_resolve(TileCoord::new(*x, *y, *z), resolver.as_ref()) {
                Some(url) => println!("{}", url),
                None => bail!("No URL for tile {}/{},{}", z, x, y),
            }
        }
        Command::Quadkey {
            tile,
            alphabet,
            decode,
        } => {
            if let Some(key) = decode {
                let tile = tileregion::decode_quadkey(key, alphabet.as_deref())
                    .with_context(|| format!("Not a quadkey: {:?}", key))?;
                println!("{}", tile);
            } else {
                let [z, x, y] = tile.as_slice() else {
                    bail!("Expected Z X Y");
                };
                let zoom = u8::try_from(*z).context("Zoom out of range")?;
                let key = tileregion::encode_quadkey(*x, *y, zoom, alphabet.as_deref());
                if alphabet.is_none() {
                    if let Some(parent) = QuadKey::parse(&key).and_then(|q| q.parent()) {
                        log::debug!("parent tile {}", parent.to_tile());
                    }
                }
                println!("{}", key);
            }
        }
        Command::Info { lat, lng, zoom } => {
            let zoom = zoom.unwrap_or(config.default_zoom);
            println!("{}", CursorInfo::at(LatLng::new(*lat, *lng), zoom));
        }
        Command::Region {
            points,
            precision,
            contains,
        } => {
            let points = points
                .iter()
                .map(|p| parse_point(p))
                .collect::<Result<Vec<_>>>()?;
            let region =
                lib(RegionPolygon::from_points(points)).context("Region has an invalid point")?;
            let precision = precision.unwrap_or(config.bounds_precision);

            lib(validate_boundary(&region.bounds())).context("Region cannot be downloaded")?;
            println!("{}", region.bounds_as_string(precision));

            if let Some(probe) = contains {
                let probe = parse_point(probe)?;
                println!("contains {},{}: {}", probe.lat, probe.lng, region.contains(&probe));
            }
        }
        Command::Layers {
            file,
            base,
            proxy,
            sample,
        } => {
            let text = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let catalog = lib(LayerCatalog::from_json_str(&text))?;
            let resolver = lib(resolver_from_config(config.custom.as_ref()))?;
            let sample = parse_tile(sample)?;

            for entry in catalog.entries(base, *proxy, resolver) {
                let url = tileregion::TileSource::url(&entry.source, sample);
                println!(
                    "{}{}\t{}",
                    entry.name,
                    if entry.enabled { " *" } else { "" },
                    url.as_deref().unwrap_or("-")
                );
            }
        }
    }

    Ok(())
}
