#![allow(dead_code)]

use constituency_search::{build_graph, AdjacencyList, Configuration, ReferenceTable, RegionReference, UnitRecord};

/// Ring of `n` units `u0 .. u{n-1}`, the first `split` in R1 and the rest in R2,
/// all in county X with the same population.
pub fn ring(n: usize, split: usize, population: i64) -> Configuration {
    let ids = (0..n).map(|i| format!("u{i}")).collect::<Vec<_>>();
    let units = ids.iter().enumerate()
        .map(|(i, id)| UnitRecord::new(id.clone(), if i < split { "R1" } else { "R2" }, "X", population))
        .collect::<Vec<_>>();
    let adjacency = AdjacencyList::from_edges(
        ids.iter().map(String::as_str),
        (0..n).map(|i| (ids[i].as_str(), ids[(i + 1) % n].as_str())),
    );
    let reference = [RegionReference::new("R1", ["X"]), RegionReference::new("R2", ["X"])]
        .into_iter().collect::<ReferenceTable>();
    Configuration::new(build_graph(&units, &adjacency, &reference).unwrap())
}

/// `width` x `height` grid cut into `bands` vertical regions `R1 ..`, with the
/// top half of the rows in county N and the bottom half in county S.
pub fn grid(width: usize, height: usize, bands: usize) -> Configuration {
    let id = |row: usize, col: usize| format!("g{row}_{col}");
    let mut units = Vec::new();
    let mut edges = Vec::new();
    for row in 0..height {
        for col in 0..width {
            let region = format!("R{}", col * bands / width + 1);
            let county = if row < height / 2 { "N" } else { "S" };
            let population = 1_000 + 37 * (row * width + col) as i64;
            units.push(UnitRecord::new(id(row, col), region, county, population));
            if col + 1 < width { edges.push((id(row, col), id(row, col + 1))) }
            if row + 1 < height { edges.push((id(row, col), id(row + 1, col))) }
        }
    }
    let adjacency = AdjacencyList::from_edges(
        units.iter().map(|unit| unit.id.as_str()),
        edges.iter().map(|(a, b)| (a.as_str(), b.as_str())),
    );
    let reference = (1..=bands)
        .map(|band| RegionReference::new(format!("R{band}"), if band % 2 == 1 { ["N"] } else { ["S"] }))
        .collect::<ReferenceTable>();
    Configuration::new(build_graph(&units, &adjacency, &reference).unwrap())
}
