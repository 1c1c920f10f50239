use grid_util::point::Point;
use maze_pathfinding::MazeGrid;

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Cells have a 4-neighborhood

fn main() {
    let maze = MazeGrid::from_fn(3, 3, |p| p == Point::new(1, 1)).unwrap();
    println!("{}", maze);
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    let path = maze.find_path(start, end).unwrap().unwrap();
    println!("Path:");
    for p in path {
        println!("{:?}", p);
    }
}
