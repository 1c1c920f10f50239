/// Fuzzes the solver by checking for many random mazes that the A* result
/// agrees with a plain breadth-first search: a path is found exactly when BFS
/// finds one, and its step count matches the BFS shortest distance.
use grid_util::point::Point;
use maze_pathfinding::{manhattan_distance, MazeGrid};
use rand::prelude::*;
use std::collections::VecDeque;

/// Reference shortest distance in steps, or [None] if the goal is unreachable.
fn bfs_distance(maze: &MazeGrid, start: Point, goal: Point) -> Option<usize> {
    let (w, h) = maze.dimensions();
    let ix = |p: Point| p.y as usize * w + p.x as usize;
    let mut distance: Vec<Option<usize>> = vec![None; w * h];
    distance[ix(start)] = Some(0);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        let d = distance[ix(current)].unwrap();
        if current == goal {
            return Some(d);
        }
        for n in maze.neighbours(current) {
            if distance[ix(n)].is_none() {
                distance[ix(n)] = Some(d + 1);
                queue.push_back(n);
            }
        }
    }
    None
}

fn visualize_maze(maze: &MazeGrid, start: &Point, goal: &Point) {
    for y in 0..maze.height() as i32 {
        for x in 0..maze.width() as i32 {
            let p = Point::new(x, y);
            if *start == p {
                print!("S");
            } else if *goal == p {
                print!("G");
            } else if maze.is_blocked(p) {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_MAZES: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Point::new(0, 0);
    let goal = Point::new(N as i32 - 1, N as i32 - 1);
    for density in [0.1, 0.3, 0.5] {
        for _ in 0..N_MAZES {
            let maze = MazeGrid::generate(N, N, density, &mut rng).unwrap();
            let path = maze.find_path(start, goal).unwrap();
            let reference = bfs_distance(&maze, start, goal);
            // Show the maze if the solver and the reference disagree
            if path.is_some() != reference.is_some() {
                visualize_maze(&maze, &start, &goal);
            }
            assert_eq!(path.is_some(), reference.is_some());
            if let Some(path) = path {
                assert_eq!(path.len(), reference.unwrap() + 1);
                assert_eq!(path[0], start);
                assert_eq!(*path.last().unwrap(), goal);
                for pair in path.windows(2) {
                    assert_eq!(manhattan_distance(&pair[0], &pair[1]), 1);
                    assert!(!maze.is_blocked(pair[1]));
                }
            }
        }
    }
}

#[test]
fn fuzz_repeat_solves_share_grid() {
    // Repeated solves of the same maze reuse its static data and must agree.
    let mut rng = StdRng::seed_from_u64(99);
    let maze = MazeGrid::generate(15, 15, 0.3, &mut rng).unwrap();
    let start = Point::new(0, 0);
    let goal = Point::new(14, 14);
    let first = maze.find_path(start, goal).unwrap();
    for _ in 0..10 {
        assert_eq!(maze.find_path(start, goal).unwrap(), first);
    }
}
