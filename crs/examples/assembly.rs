//! Assemble a 2D five-point Laplacian row by row, then hand it to a tracker

use crs::{CrsConfig, CrsMatrix, HostRegistry, MemorySpace, SparseMatrix, SparsityPattern};
use std::time::Instant;

const GRID: usize = 200;

/// Column indices coupled to grid point `(i, j)`, ascending
fn stencil(i: usize, j: usize) -> Vec<u32> {
    let mut cols = Vec::with_capacity(5);
    if i > 0 {
        cols.push((i - 1) * GRID + j);
    }
    if j > 0 {
        cols.push(i * GRID + j - 1);
    }
    cols.push(i * GRID + j);
    if j + 1 < GRID {
        cols.push(i * GRID + j + 1);
    }
    if i + 1 < GRID {
        cols.push((i + 1) * GRID + j);
    }
    cols.into_iter().map(|c| c as u32).collect()
}

fn main() -> crs::Result<()> {
    let n = GRID * GRID;
    let config = CrsConfig::new().with_name("laplacian");
    let mut matrix = CrsMatrix::<f64>::with_config(n, n, config)?;

    println!("Assembling {n} x {n} five-point Laplacian...");

    // Sizing pass: every row gets exactly the room its stencil needs
    let start = Instant::now();
    for row in 0..n {
        let cols = stencil(row / GRID, row % GRID);
        matrix.reserve_non_zeros_in_row(row, cols.len())?;
    }
    println!(
        "Rows sized in {:.3}ms ({} slots)",
        start.elapsed().as_secs_f64() * 1000.0,
        matrix.non_zero_capacity()
    );

    // Structure pass through a view: no row can grow, so rows are independent
    let start = Instant::now();
    {
        let mut view = matrix.to_view();
        for mut row in view.rows_mut() {
            let r = row.row();
            let cols = stencil(r / GRID, r % GRID);
            let values = vec![0.0; cols.len()];
            row.insert_non_zeros_sorted(&cols, &values)?;
        }
    }
    println!(
        "Structure inserted in {:.3}ms",
        start.elapsed().as_secs_f64() * 1000.0
    );

    // Value pass: accumulate edge contributions into existing entries
    let start = Instant::now();
    {
        let mut values = matrix.to_view_semi_const();
        for row in 0..n {
            let (i, j) = (row / GRID, row % GRID);
            for neighbour in stencil(i, j) {
                if neighbour as usize != row {
                    values.add_to_row(row, &[row as u32, neighbour], &[1.0, -1.0])?;
                }
            }
        }
    }
    println!(
        "Values accumulated in {:.3}ms",
        start.elapsed().as_secs_f64() * 1000.0
    );

    matrix.consistency_check()?;
    matrix.compress();

    println!("\nMatrix Information:");
    println!("   Dimensions: {} x {}", matrix.num_rows(), matrix.num_columns());
    println!("   Non-zeros: {}", matrix.num_non_zeros());
    println!("   Capacity: {}", matrix.non_zero_capacity());
    let corner = matrix.row(0);
    println!("   Row 0: {:?}", corner.iter().collect::<Vec<_>>());
    let centre = (GRID / 2) * GRID + GRID / 2;
    println!("   Diagonal at centre: {:?}", matrix.get_element(centre, centre as u32));

    let mut registry = HostRegistry::new();
    matrix.register_buffers(&mut registry);
    matrix.move_to(MemorySpace::Accelerator, &mut registry);
    println!(
        "\nMoved {} bytes to the accelerator",
        registry.resident_bytes(MemorySpace::Accelerator)
    );
    matrix.release_buffers(&mut registry);
    println!("Released: {:?}", registry.freed());

    Ok(())
}
