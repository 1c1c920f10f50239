use grid_util::point::Point;
use maze_pathfinding::MazeGrid;
use rand::prelude::*;

// Generates a random 20x20 maze with obstacle density 0.3, solves it from the
// top-left to the bottom-right corner, and renders the result as ASCII art:
// '#' for walls, '*' for the path, '.' for open cells. The same grid is both
// displayed and solved. An optional command line argument sets the seed.

const WIDTH: usize = 20;
const HEIGHT: usize = 20;
const DENSITY: f64 = 0.3;

fn render(maze: &MazeGrid, path: Option<&[Point]>) {
    let on_path = |p: Point| path.map_or(false, |path| path.contains(&p));
    for y in 0..maze.height() as i32 {
        for x in 0..maze.width() as i32 {
            let p = Point::new(x, y);
            if maze.is_blocked(p) {
                print!("#");
            } else if on_path(p) {
                print!("*");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(0);
    let mut rng = StdRng::seed_from_u64(seed);
    let maze = MazeGrid::generate(WIDTH, HEIGHT, DENSITY, &mut rng).unwrap();
    let start = Point::new(0, 0);
    let goal = Point::new(WIDTH as i32 - 1, HEIGHT as i32 - 1);
    match maze.find_path(start, goal).unwrap() {
        Some(path) => {
            println!("Solved in {} steps:", path.len() - 1);
            render(&maze, Some(&path));
        }
        None => {
            println!("No path exists:");
            render(&maze, None);
        }
    }
}
