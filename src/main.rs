use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;

use map_generator::biomes::Biome;
use map_generator::export;
use map_generator::pipeline::{generate, GenerationConfig, MapData, POINT_COUNT_CHOICES};

#[derive(Parser, Debug)]
#[command(name = "map_generator")]
#[command(about = "Generate seeded Voronoi biome maps with elevation shading")]
struct Args {
    /// Generation seed
    #[arg(short, long, default_value_t = 0)]
    seed: u32,

    /// Number of Voronoi seed points
    #[arg(short, long, default_value_t = 1024, value_parser = parse_point_count)]
    points: usize,

    /// Keep hard polygonal region boundaries (skip noise blending)
    #[arg(long)]
    no_blend: bool,

    /// Side length of the map in pixels
    #[arg(long, default_value_t = 512)]
    size: usize,

    /// Lloyd relaxation iterations
    #[arg(long, default_value_t = 2)]
    relax: usize,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// Export every intermediate stage plus a contact sheet
    #[arg(long)]
    all_stages: bool,
}

fn parse_point_count(raw: &str) -> Result<usize, String> {
    let count: usize = raw.parse().map_err(|e| format!("{e}"))?;
    if POINT_COUNT_CHOICES.contains(&count) {
        Ok(count)
    } else {
        Err(format!("must be one of {POINT_COUNT_CHOICES:?}"))
    }
}

/// Run summary written next to the images.
#[derive(serde::Serialize)]
struct RunManifest<'a> {
    config: &'a GenerationConfig,
    surviving_points: usize,
    sea_fraction: f64,
    biome_cells: BTreeMap<&'static str, usize>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = GenerationConfig {
        seed: args.seed,
        point_count: args.points,
        blend: !args.no_blend,
        map_size: args.size,
        relax_iterations: args.relax,
    };

    println!(
        "Generating {}x{} map with seed {} ({} points, blend {})",
        config.map_size, config.map_size, config.seed, config.point_count, config.blend
    );

    let data = generate(&config)?;
    println!(
        "Relaxation kept {} of {} points",
        data.relaxed_points.len(),
        data.points.len()
    );

    let total_cells = (config.map_size * config.map_size) as f64;
    let sea_cells = data.sea_mask.iter().filter(|(_, _, &sea)| sea).count();
    println!(
        "Sea covers {:.1}% of the map",
        100.0 * sea_cells as f64 / total_cells
    );

    fs::create_dir_all(&args.out)?;

    let final_path = args.out.join("final_map.png");
    export::render_color_map(&data.final_map).save(&final_path)?;
    println!("Wrote {}", final_path.display());

    if args.all_stages {
        export_stages(&data, args)?;
    }

    let manifest = RunManifest {
        config: &config,
        surviving_points: data.relaxed_points.len(),
        sea_fraction: sea_cells as f64 / total_cells,
        biome_cells: biome_histogram(&data),
    };
    let manifest_path = args.out.join("manifest.json");
    fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)?;
    println!("Wrote {}", manifest_path.display());

    Ok(())
}

fn export_stages(data: &MapData, args: &Args) -> Result<(), Box<dyn Error>> {
    let region_count = data.voronoi.regions().len();
    let stages: [(&str, image::RgbImage); 9] = [
        (
            "0_1_points.png",
            export::render_points(&data.points, data.config.map_size),
        ),
        (
            "0_2_relaxed.png",
            export::render_points(&data.relaxed_points, data.config.map_size),
        ),
        (
            "1_voronoi_map.png",
            export::render_region_map(&data.region_grid, region_count),
        ),
        (
            "2_blurred_map.png",
            export::render_region_map(&data.warped_grid, region_count),
        ),
        (
            "3_biomes_map.png",
            export::render_color_map(&map_generator::biomes::color_map(&data.biome_map)),
        ),
        ("4_sea_map.png", export::render_mask(&data.sea_mask)),
        ("5_biomes_sea_map.png", export::render_color_map(&data.sea_map)),
        (
            "6_final_map.png",
            export::render_color_map(&data.final_map),
        ),
        (
            "7_elevation.png",
            export::render_scalar_map(&data.elevation),
        ),
    ];
    for (name, img) in &stages {
        let path = args.out.join(name);
        img.save(&path)?;
        println!("Wrote {}", path.display());
    }

    let sheet_path = args.out.join("all_maps.png");
    export::render_contact_sheet(data).save(&sheet_path)?;
    println!("Wrote {}", sheet_path.display());
    Ok(())
}

fn biome_histogram(data: &MapData) -> BTreeMap<&'static str, usize> {
    let mut cells: BTreeMap<&'static str, usize> = BTreeMap::new();
    for biome in Biome::all() {
        cells.insert(biome.name(), 0);
    }
    for (x, y, &biome) in data.biome_map.iter() {
        let shown = if *data.sea_mask.get(x, y) {
            Biome::Water
        } else {
            biome
        };
        *cells.entry(shown.name()).or_insert(0) += 1;
    }
    cells
}
