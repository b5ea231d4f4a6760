// Keyword co-occurrence network — nodes, edges, top-neighbor rankings.

pub mod builder;
pub mod categories;
