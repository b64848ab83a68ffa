use docopt::Docopt;
use serde_derive::Deserialize;
use hexweave::{
    cells::Cartesian2DCoordinate,
    config::{MazeConfig, MazeConfigBuilder},
    generators,
    grid_displays::{self, HexTextDisplay, MaskDump, WeaveTextDisplay},
    grids,
    hex_geometry::HexGeometry,
    units::{Height, Width},
    values::CellValues,
};
use itertools::Itertools;

const USAGE: &str = "Hex and weave mazes

Usage:
    hexweave_driver -h | --help
    hexweave_driver hex [--width=<w>] [--height=<h>] [--seed=<s>] [--dump]
    hexweave_driver weave [--width=<w>] [--height=<h>] [--max-fails=<n>] [--seed=<s>] [--dump]

Options:
    -h --help          Show this screen.
    --width=<w>        The grid width [default: 10].
    --height=<h>       The grid height, the same as the width if not specified.
    --max-fails=<n>    Consecutive rejected tunnel placements before a weave maze stops adding tunnels [default: 5].
    --seed=<s>         Seed for the random number generator, chosen at random if not specified.
    --dump             Also print the raw cell masks.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_hex: bool,
    cmd_weave: bool,
    flag_width: usize,
    flag_height: Option<usize>,
    flag_max_fails: usize,
    flag_seed: Option<u32>,
    flag_dump: bool,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::hexweave::errors::Error, ::hexweave::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let mut builder = MazeConfigBuilder::new(Width(args.flag_width))
        .max_consecutive_failures(args.flag_max_fails);
    if let Some(height) = args.flag_height {
        builder = builder.height(Height(height));
    }
    if let Some(seed) = args.flag_seed {
        builder = builder.seed(seed);
    }
    let config = builder.build()?;

    if args.cmd_hex {
        run_hex(&config, args.flag_dump)
    } else if args.cmd_weave {
        run_weave(&config, args.flag_dump)
    } else {
        Ok(())
    }
}

fn format_coordinate(coord: &Cartesian2DCoordinate) -> String {
    format!("({},{})", coord.x, coord.y)
}

fn run_hex(config: &MazeConfig, dump: bool) -> Result<()> {
    let mut rng = config.rng();
    let mut grid = grids::hex_grid(config.width(), config.height())?;
    generators::prims_hex(&mut grid, &mut rng)?;

    let player = grid.random_cell(&mut rng);
    let enemy = grid.random_cell(&mut rng);
    let mut values = CellValues::new(config.width(), config.height())?;
    values.set(player, grid_displays::PLAYER)?;
    values.set(enemy, grid_displays::ENEMY)?;

    let geometry = HexGeometry::for_grid(&grid);
    let line_of_sight = geometry.line_of_sight(player, enemy);
    if let Ok(ref path) = line_of_sight {
        for &coord in path.iter().filter(|&&c| c != player && c != enemy) {
            values.set(coord, grid_displays::SHELL)?;
        }
    }

    print!("{}", HexTextDisplay::new(&grid).with_values(&values));
    if dump {
        println!("\nValues:\n{}", values);
        println!("Borders:\n{}", MaskDump::new(&grid));
    }
    println!("hexweave_driver hex --width={} --height={} --seed={}",
             config.width().0,
             config.height().0,
             config.seed());
    println!("Distance from {} to {} = {}",
             format_coordinate(&player),
             format_coordinate(&enemy),
             geometry.distance(player, enemy)?);
    match line_of_sight {
        Ok(path) => println!("LOS: {}", path.iter().map(format_coordinate).join(" ")),
        Err(e) => println!("LOS: {}", e),
    }
    Ok(())
}

fn run_weave(config: &MazeConfig, dump: bool) -> Result<()> {
    let (grid, report) = generators::generate_weave_maze(config)?;

    print!("{}", WeaveTextDisplay::new(&grid));
    if dump {
        println!("\nPassages:\n{}", MaskDump::new(&grid));
    }
    println!("{} tunnels", report.decoration.tunnels.len());
    println!("hexweave_driver weave --width={} --height={} --max-fails={} --seed={}",
             config.width().0,
             config.height().0,
             config.max_consecutive_failures(),
             config.seed());
    Ok(())
}
