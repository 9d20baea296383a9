//! Live k-means engine
//!
//! Owns a fixed population of points and the clusters built over it.
//! `initialize(k)` builds the first partition once; `step()` runs one greedy
//! reassignment pass and is meant to be called once per tick by a driver.
//!
//! A pass is not a Lloyd iteration:
//! - clusters are visited in list order, members in membership order
//! - a point moves to the *first* other cluster whose centroid is strictly closer
//!   than its own, not to the nearest one
//! - centroids are updated on every move, so later comparisons in the same pass
//!   already see earlier moves

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, trace, warn};

use crate::{
    cluster::Cluster,
    context::{EngineContext, MemberScan},
    error::{ClusterError, Result},
    init::{seed_farthest_pair, seed_random},
    types::{Color, Point, distance},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Initialized,
}

#[derive(Clone, Debug)]
pub struct Engine {
    points: Vec<Point>,
    clusters: Vec<Cluster>,
    context: EngineContext,
    rng: ChaCha20Rng,
}

impl Engine {
    pub fn new<P: Into<Point>>(points: impl IntoIterator<Item = P>) -> Self {
        Self::with_context(points, EngineContext::default())
    }

    pub fn with_context<P: Into<Point>>(
        points: impl IntoIterator<Item = P>,
        context: EngineContext,
    ) -> Self {
        Self {
            points: points.into_iter().map(Into::into).collect(),
            clusters: Vec::new(),
            rng: ChaCha20Rng::seed_from_u64(context.seed),
            context,
        }
    }

    /// Start from an explicit partition instead of `initialize`
    ///
    /// Every point must appear in exactly one group. Clusters get random colors
    /// from the context's seed and points are painted right away.
    pub fn from_partition<P: Into<Point>>(
        points: impl IntoIterator<Item = P>,
        groups: Vec<Vec<usize>>,
        context: EngineContext,
    ) -> Result<Self> {
        let mut engine = Self::with_context(points, context);
        let population = engine.points.len();
        if groups.is_empty() {
            return Err(ClusterError::InvalidConfiguration {
                requested: 0,
                population,
            });
        }

        let mut owner: Vec<Option<usize>> = vec![None; population];
        for (cid, group) in groups.iter().enumerate() {
            for point in group {
                if owner.get(*point) != Some(&None) {
                    return Err(ClusterError::InvariantViolation {
                        point: *point,
                        cluster: cid,
                    });
                }
                owner[*point] = Some(cid);
            }
        }
        if let Some(point) = owner.iter().position(Option::is_none) {
            return Err(ClusterError::InvariantViolation {
                point,
                cluster: groups.len(),
            });
        }

        engine.clusters = groups
            .into_iter()
            .enumerate()
            .map(|(id, members)| {
                Cluster::new(id, members, Color::random(&mut engine.rng), &engine.points)
            })
            .collect();
        for cluster in engine.clusters.iter() {
            cluster.set_color(&mut engine.points);
        }
        Ok(engine)
    }

    pub fn state(&self) -> EngineState {
        if self.clusters.is_empty() {
            EngineState::Uninitialized
        } else {
            EngineState::Initialized
        }
    }

    pub fn context(&self) -> &EngineContext {
        &self.context
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Cluster index of every point, in population order
    pub fn assignment(&self) -> Vec<usize> {
        let mut assigned = vec![0; self.points.len()];
        for (cid, cluster) in self.clusters.iter().enumerate() {
            for point in cluster.members() {
                assigned[*point] = cid;
            }
        }
        assigned
    }

    /// Build the initial clusters. Does nothing if they already exist.
    pub fn initialize(&mut self, k: usize) -> Result<()> {
        if self.state() == EngineState::Initialized {
            warn!(
                k,
                clusters = self.clusters.len(),
                "engine already initialized, ignoring"
            );
            return Ok(());
        }
        if k < 1 || k > self.points.len() {
            return Err(ClusterError::InvalidConfiguration {
                requested: k,
                population: self.points.len(),
            });
        }

        self.clusters = if k == 2 {
            seed_farthest_pair(&self.points, &mut self.rng)
        } else {
            seed_random(&self.points, k, &mut self.rng)
        };
        for cluster in self.clusters.iter() {
            cluster.set_color(&mut self.points);
        }
        let sizes: Vec<usize> = self.clusters.iter().map(Cluster::len).collect();
        debug!(k, ?sizes, "clusters initialized");
        Ok(())
    }

    /// One reassignment pass, then a color refresh.
    ///
    /// The pass works on a copy of the clusters; nothing is committed unless
    /// the whole pass succeeds.
    pub fn step(&mut self) -> Result<()> {
        if self.state() == EngineState::Uninitialized {
            return Err(ClusterError::PrematureOperation);
        }

        let mut clusters = self.clusters.clone();
        let moves = match self.context.member_scan {
            MemberScan::Snapshot => reassign_snapshot(&mut clusters, &self.points)?,
            MemberScan::LiveCursor => reassign_live_cursor(&mut clusters, &self.points)?,
        };
        self.clusters = clusters;

        for cluster in self.clusters.iter() {
            cluster.set_color(&mut self.points);
        }
        debug!(moves, "reassignment pass done");
        Ok(())
    }
}

/// First cluster other than `own` whose centroid is strictly closer to `point` than `own`'s
fn first_closer(clusters: &[Cluster], own: usize, point: &Point) -> Option<usize> {
    let d = distance(point.xy(), clusters[own].centroid());
    (0..clusters.len())
        .filter(|cid| *cid != own)
        .find(|cid| distance(point.xy(), clusters[*cid].centroid()) < d)
}

fn move_point(
    clusters: &mut [Cluster],
    points: &[Point],
    point: usize,
    from: usize,
    to: usize,
) -> Result<()> {
    clusters[from].remove_node(point, points)?;
    clusters[to].add_node(point, points);
    trace!(point, from, to, "point moved");
    Ok(())
}

fn reassign_snapshot(clusters: &mut [Cluster], points: &[Point]) -> Result<usize> {
    let mut moves = 0;
    for cid in 0..clusters.len() {
        let members = clusters[cid].members().to_vec();
        for point in members {
            if let Some(target) = first_closer(clusters, cid, &points[point]) {
                move_point(clusters, points, point, cid, target)?;
                moves += 1;
            }
        }
    }
    Ok(moves)
}

fn reassign_live_cursor(clusters: &mut [Cluster], points: &[Point]) -> Result<usize> {
    let mut moves = 0;
    for cid in 0..clusters.len() {
        let mut cursor = 0;
        while let Some(&point) = clusters[cid].members().get(cursor) {
            if let Some(target) = first_closer(clusters, cid, &points[point]) {
                move_point(clusters, points, point, cid, target)?;
                moves += 1;
            }
            cursor += 1;
        }
    }
    Ok(moves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BLACK;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|c| Point::from(*c)).collect()
    }

    fn hand_built(points: Vec<Point>, groups: Vec<Vec<usize>>, scan: MemberScan) -> Engine {
        let mut engine = Engine::with_context(points, EngineContext::new(0).with_member_scan(scan));
        engine.clusters = groups
            .into_iter()
            .enumerate()
            .map(|(id, members)| {
                let color = Color::new(id as u8 * 100, 0, 0);
                Cluster::new(id, members, color, &engine.points)
            })
            .collect();
        engine
    }

    #[test]
    fn first_closer_is_first_not_nearest() {
        let points = pts(&[(0.0, 0.0), (6.0, 0.0), (10.0, 0.0), (10.0, 0.0)]);
        // centroids: c0 = (0,0), c1 = (6,0), c2 = (10,0); point 2 sits in c0
        let groups = vec![vec![0], vec![1], vec![3]];
        let engine = hand_built(points.clone(), groups, MemberScan::Snapshot);
        assert_eq!(first_closer(&engine.clusters, 0, &points[2]), Some(1));
        assert_eq!(first_closer(&engine.clusters, 2, &points[3]), None);
    }

    #[test]
    fn snapshot_visits_every_member() {
        // both far points of c0 are closer to c1; a snapshot walk moves both
        let points = pts(&[(0.0, 0.0), (9.0, 0.0), (9.5, 0.0), (10.0, 0.0)]);
        let mut engine = hand_built(points, vec![vec![0, 1, 2], vec![3]], MemberScan::Snapshot);
        engine.step().unwrap();
        assert_eq!(engine.clusters[0].members(), &[0]);
        assert_eq!(engine.clusters[1].members(), &[3, 1, 2]);
    }

    #[test]
    fn live_cursor_skips_the_member_after_a_move() {
        let points = pts(&[(0.0, 0.0), (9.0, 0.0), (9.5, 0.0), (10.0, 0.0)]);
        let mut engine = hand_built(points, vec![vec![0, 1, 2], vec![3]], MemberScan::LiveCursor);
        engine.step().unwrap();
        // point 2 slid into point 1's slot and was skipped this pass
        assert_eq!(engine.clusters[0].members(), &[0, 2]);
        assert_eq!(engine.clusters[1].members(), &[3, 1]);

        engine.step().unwrap();
        assert_eq!(engine.clusters[0].members(), &[0]);
        assert_eq!(engine.clusters[1].members(), &[3, 1, 2]);
    }

    #[test]
    fn failed_move_changes_nothing() {
        let points = pts(&[(0.0, 0.0), (10.0, 0.0), (9.0, 0.0)]);
        let engine = hand_built(points, vec![vec![0], vec![1, 2]], MemberScan::Snapshot);
        let mut clusters = engine.clusters.clone();
        let err = move_point(&mut clusters, &engine.points, 2, 0, 1).unwrap_err();
        assert_eq!(
            err,
            ClusterError::InvariantViolation {
                point: 2,
                cluster: 0
            }
        );
        assert_eq!(clusters, engine.clusters);
    }

    #[test]
    fn step_repaints_points() {
        let points = pts(&[(0.0, 0.0), (9.0, 0.0), (10.0, 0.0)]);
        let mut engine = hand_built(points, vec![vec![0, 1], vec![2]], MemberScan::Snapshot);
        assert!(engine.points.iter().all(|p| p.color == BLACK));
        engine.step().unwrap();
        assert_eq!(engine.assignment(), vec![0, 1, 1]);
        for cluster in engine.clusters() {
            for point in cluster.points(engine.points()) {
                assert_eq!(point.color, cluster.color());
            }
        }
    }
}
