//! Priority-frontier search shared by uniform-cost and A*.

use std::collections::BinaryHeap;
use std::mem::size_of;

use pursuit_core::Point;

use crate::PathRange;
use crate::pathrange::{MemoryMeter, NodeRef, SearchResult, Trace, VISITED_ENTRY};
use crate::strategy::Strategy;
use crate::traits::WeightedPather;

impl PathRange {
    /// Expand positions in order of `g + h(p)`, ties broken by insertion.
    ///
    /// A position is re-queued whenever a strictly cheaper path to it is
    /// found; superseded queue entries are dropped on pop without counting
    /// as an expansion.
    pub(crate) fn best_first<P: WeightedPather>(
        &mut self,
        strategy: Strategy,
        pather: &P,
        from: Point,
        to: Point,
        h: impl Fn(Point) -> i32,
    ) -> SearchResult {
        self.run(strategy, from, to, |pr, start_idx, goal_idx, cur_gen| {
            let mut meter = MemoryMeter::default();
            let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
            let mut seq: u64 = 0;

            pr.visit(start_idx, usize::MAX, 0, cur_gen);
            meter.alloc(VISITED_ENTRY);
            open.push(NodeRef {
                idx: start_idx,
                f: h(from),
                seq,
            });
            meter.alloc(size_of::<NodeRef>());

            let mut nbuf = std::mem::take(&mut pr.nbuf);
            let mut expanded = 0;
            let mut found = false;

            while let Some(current) = open.pop() {
                meter.free(size_of::<NodeRef>());
                let ci = current.idx;

                // Skip stale entries.
                if !pr.nodes[ci].open {
                    continue;
                }
                expanded += 1;
                if ci == goal_idx {
                    found = true;
                    break;
                }

                pr.nodes[ci].open = false;
                let current_g = pr.nodes[ci].g;
                let cp = pr.point(ci);

                nbuf.clear();
                pather.neighbors(cp, &mut nbuf);

                for &np in nbuf.iter() {
                    let Some(ni) = pr.idx(np) else {
                        continue;
                    };
                    let tentative_g = current_g + pather.cost(cp, np);
                    if pr.visited(ni, cur_gen) {
                        if tentative_g >= pr.nodes[ni].g {
                            continue;
                        }
                    } else {
                        meter.alloc(VISITED_ENTRY);
                    }

                    pr.visit(ni, ci, tentative_g, cur_gen);
                    seq += 1;
                    open.push(NodeRef {
                        idx: ni,
                        f: tentative_g + h(np),
                        seq,
                    });
                    meter.alloc(size_of::<NodeRef>());
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
