use std::collections::VecDeque;
use std::mem::size_of;

use pursuit_core::Point;

use crate::PathRange;
use crate::pathrange::{MemoryMeter, SearchResult, Trace, VISITED_ENTRY};
use crate::strategy::Strategy;
use crate::traits::Pather;

impl PathRange {
    /// Breadth-first search from `from` to `to`.
    ///
    /// Positions are marked visited when discovered and expanded in FIFO
    /// order; the search stops as soon as the goal is popped, so the path
    /// has the fewest possible steps.
    pub fn bfs_path<P: Pather>(&mut self, pather: &P, from: Point, to: Point) -> SearchResult {
        self.run(Strategy::Bfs, from, to, |pr, start_idx, goal_idx, cur_gen| {
            let mut meter = MemoryMeter::default();
            let mut queue: VecDeque<usize> = VecDeque::new();

            pr.visit(start_idx, usize::MAX, 0, cur_gen);
            meter.alloc(VISITED_ENTRY);
            queue.push_back(start_idx);
            meter.alloc(size_of::<usize>());

            let mut nbuf = std::mem::take(&mut pr.nbuf);
            let mut expanded = 0;
            let mut found = false;

            while let Some(ci) = queue.pop_front() {
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

                for &np in nbuf.iter() {
                    let Some(ni) = pr.idx(np) else {
                        continue;
                    };
                    if pr.visited(ni, cur_gen) {
                        continue;
                    }
                    pr.visit(ni, ci, next_g, cur_gen);
                    meter.alloc(VISITED_ENTRY);
                    queue.push_back(ni);
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
