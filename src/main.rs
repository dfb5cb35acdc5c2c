use clap::Parser;
use env_logger::Env;
use log::{info, warn};
use tabletop_world::{
    domain::{ObjectRequest, ObjectSize, Position, TableRequest, TableSize, World, WorldError},
    render::plot_world,
};

#[derive(Parser)]
#[command(name = "tabletop-world")]
#[command(about = "Generates a random room with tables and objects")]
#[command(version)]
struct Cli {
    /// Seed of the random placements (default: random)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Half the side length of the square room
    #[arg(short, long, default_value_t = 20.0)]
    room_size: f64,

    /// Number of tables to place in the room
    #[arg(short, long, default_value_t = 2)]
    tables: usize,

    /// Number of objects to place on the first table
    #[arg(short, long, default_value_t = 3)]
    objects: usize,

    /// Table size preset: small, medium or large (default: random size)
    #[arg(long)]
    table_size: Option<TableSize>,

    /// Object size preset: small, medium or large (default: random radius)
    #[arg(long)]
    object_size: Option<ObjectSize>,

    /// Width of the plot in characters
    #[arg(long, default_value_t = 120)]
    width: u32,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), WorldError> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let mut world = match cli.seed {
        Some(seed) => World::with_seed("demo", seed),
        None => World::new("demo"),
    };

    let half = cli.room_size;
    let room = world.add_room(
        [(-half, -half), (half, -half), (half, half), (-half, half)].map(Position::from),
        None,
        None,
    )?;

    let mut table_request = TableRequest::new();
    if let Some(size) = cli.table_size {
        table_request = table_request.with_size(size);
    }
    let mut tables = vec![];
    for _ in 0..cli.tables {
        match world.add_random_table(room, &table_request)? {
            Some(table) => tables.push(table),
            None => warn!("room is full, placed {} tables", tables.len()),
        }
    }

    let mut object_request = ObjectRequest::new();
    if let Some(size) = cli.object_size {
        object_request = object_request.with_size(size);
    }
    if let Some(&table) = tables.first() {
        for _ in 0..cli.objects {
            world.add_random_object(table, &object_request)?;
        }
    }

    for entity in world.entities() {
        let centroid = entity.centroid();
        info!(
            "{} {} at ({:.2}, {:.2})",
            entity.kind(),
            entity.name(),
            centroid.x(),
            centroid.y()
        );
    }

    if let Some(chart) = plot_world(&world, cli.width, cli.width / 2) {
        println!("{chart}");
    }

    Ok(())
}
