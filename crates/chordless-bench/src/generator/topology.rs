//! Component builders: random core, grid, wheel, and chorded rings.

use chordless_core::CycleGraph;
use rand::Rng;
use rand::rngs::StdRng;

/// Accumulates components over a shared id space. Each new component is
/// joined to the previous one by a single bridge edge.
#[derive(Debug, Default)]
pub struct Builder {
    edges: Vec<(usize, usize)>,
    next: usize,
    anchor: Option<usize>,
}

impl Builder {
    /// Number of nodes allocated so far.
    pub fn node_count(&self) -> usize {
        self.next
    }

    /// Allocates `n` fresh ids and bridges the first one to the previous
    /// component. Returns the first id.
    fn component(&mut self, n: usize) -> usize {
        let first = self.next;
        self.next += n;
        if let Some(anchor) = self.anchor {
            self.edges.push((anchor, first));
        }
        self.anchor = Some(first);
        first
    }

    /// Erdős–Rényi G(n, p) core.
    pub fn random(&mut self, rng: &mut StdRng, n: usize, p: f64) {
        if n == 0 {
            return;
        }
        let base = self.component(n);
        for a in 0..n {
            for b in a + 1..n {
                if rng.gen_bool(p) {
                    self.edges.push((base + a, base + b));
                }
            }
        }
    }

    /// `rows × cols` grid.
    pub fn grid(&mut self, rows: usize, cols: usize) {
        if rows == 0 || cols == 0 {
            return;
        }
        let base = self.component(rows * cols);
        let id = |r: usize, c: usize| base + r * cols + c;
        for r in 0..rows {
            for c in 0..cols {
                if c + 1 < cols {
                    self.edges.push((id(r, c), id(r, c + 1)));
                }
                if r + 1 < rows {
                    self.edges.push((id(r, c), id(r + 1, c)));
                }
            }
        }
    }

    /// Hub joined to every node of a rim cycle. Rims shorter than 3 are
    /// skipped.
    pub fn wheel(&mut self, rim: usize) {
        if rim < 3 {
            return;
        }
        let hub = self.component(rim + 1);
        for i in 0..rim {
            let a = hub + 1 + i;
            let b = hub + 1 + (i + 1) % rim;
            self.edges.push((hub, a));
            self.edges.push((a, b));
        }
    }

    /// Cycle of length `len` plus up to `chords` random chords.
    pub fn ring(&mut self, rng: &mut StdRng, len: usize, chords: usize) {
        if len < 3 {
            return;
        }
        let base = self.component(len);
        for i in 0..len {
            self.edges.push((base + i, base + (i + 1) % len));
        }
        if len < 4 {
            return;
        }
        for _ in 0..chords {
            let a = rng.gen_range(0..len);
            // Skip the two ring neighbors and `a` itself.
            let offset = rng.gen_range(2..len - 1);
            let b = (a + offset) % len;
            self.edges.push((base + a, base + b));
        }
    }

    /// Builds the graph. Duplicate edges collapse.
    pub fn finish(self) -> CycleGraph {
        let mut graph = CycleGraph::with_nodes(self.next);
        for (a, b) in self.edges {
            graph.add_edge(a, b);
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use rand::SeedableRng;

    use super::*;

    #[test]
    fn components_are_chained_by_bridges() {
        let mut b = Builder::default();
        b.wheel(4);
        b.grid(2, 2);
        assert_eq!(b.node_count(), 9);
        let g = b.finish();
        // 8 wheel edges, 4 grid edges, 1 bridge.
        assert_eq!(g.edge_count(), 13);
        assert_eq!(chordless_core::bridges(&g), vec![(0, 5)]);
    }

    #[test]
    fn ring_chords_stay_inside_the_ring() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut b = Builder::default();
        b.ring(&mut rng, 6, 3);
        let g = b.finish();
        assert_eq!(g.node_count(), 6);
        assert!(g.edge_count() >= 7 && g.edge_count() <= 9);
        assert!(chordless_core::bridges(&g).is_empty());
    }

    #[test]
    fn degenerate_sizes_add_nothing() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut b = Builder::default();
        b.random(&mut rng, 0, 0.5);
        b.grid(0, 3);
        b.wheel(2);
        b.ring(&mut rng, 2, 1);
        assert_eq!(b.node_count(), 0);
    }
}
