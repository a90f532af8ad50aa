use std::mem::size_of;

use pursuit_core::Point;

use crate::PathRange;
use crate::pathrange::{MemoryMeter, SearchResult, Trace, VISITED_ENTRY};
use crate::strategy::Strategy;
use crate::traits::Pather;

impl PathRange {
    /// Depth-first search from `from` to `to`.
    ///
    /// Neighbors are pushed in reverse expansion order, so the first
    /// neighbor (right) is popped first. Positions are marked visited when
    /// pushed. The path is valid but usually not the shortest.
    pub fn dfs_path<P: Pather>(&mut self, pather: &P, from: Point, to: Point) -> SearchResult {
        self.run(Strategy::Dfs, from, to, |pr, start_idx, goal_idx, cur_gen| {
            let mut meter = MemoryMeter::default();
            let mut stack: Vec<usize> = vec![start_idx];
            meter.alloc(size_of::<usize>());
            pr.visit(start_idx, usize::MAX, 0, cur_gen);
            meter.alloc(VISITED_ENTRY);

            let mut nbuf = std::mem::take(&mut pr.nbuf);
            let mut expanded = 0;
            let mut found = false;

            while let Some(ci) = stack.pop() {
                meter.free(size_of::<usize>());
                expanded += 1;
                if ci == goal_idx {
                    found = true;
                    break;
                }

                let cp = pr.point(ci);
                let next_g = pr.nodes[ci].g + 1;
                nbuf.clear();
                pather.neighbors(cp, &mut nbuf);

                for &np in nbuf.iter().rev() {
                    let Some(ni) = pr.idx(np) else {
                        continue;
                    };
                    if pr.visited(ni, cur_gen) {
                        continue;
                    }
                    pr.visit(ni, ci, next_g, cur_gen);
                    meter.alloc(VISITED_ENTRY);
                    stack.push(ni);
                    meter.alloc(size_of::<usize>());
                }
            }

            pr.nbuf = nbuf;
            Trace {
                found,
                expanded,
                peak_memory: meter.peak(),
            }
        })
    }
}
