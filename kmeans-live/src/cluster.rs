//! Cluster of points with an eagerly maintained centroid
//!
//! Members are stored as indices into the engine's point list, so two points
//! with the same coordinates stay distinct members.

use serde::{Deserialize, Serialize};

use crate::{
    error::{ClusterError, Result},
    types::{Color, Point, distance},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Position of this cluster in the engine's cluster list
    pub id: usize,
    members: Vec<usize>,
    centroid: (f64, f64),
    color: Color,
}

impl Cluster {
    /// Build a cluster from its initial members; the centroid is computed right away
    pub fn new(id: usize, members: Vec<usize>, color: Color, points: &[Point]) -> Self {
        let mut cluster = Self {
            id,
            members,
            centroid: (0.0, 0.0),
            color,
        };
        cluster.calc_centroid(points);
        cluster
    }

    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, point: usize) -> bool {
        self.members.contains(&point)
    }

    pub fn centroid(&self) -> (f64, f64) {
        self.centroid
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Iterate member points in membership order
    pub fn points<'a>(&'a self, points: &'a [Point]) -> impl Iterator<Item = &'a Point> + 'a {
        self.members.iter().map(move |id| &points[*id])
    }

    /// Arithmetic mean of the member coordinates, (0,0) when empty
    fn calc_centroid(&mut self, points: &[Point]) {
        if self.members.is_empty() {
            self.centroid = (0.0, 0.0);
            return;
        }
        let (x_sum, y_sum) = self
            .members
            .iter()
            .fold((0.0, 0.0), |(x, y), id| (x + points[*id].x, y + points[*id].y));
        let n = self.members.len() as f64;
        self.centroid = (x_sum / n, y_sum / n);
    }

    pub fn add_node(&mut self, point: usize, points: &[Point]) {
        self.members.push(point);
        self.calc_centroid(points);
    }

    pub fn remove_node(&mut self, point: usize, points: &[Point]) -> Result<()> {
        let pos = self
            .members
            .iter()
            .position(|id| *id == point)
            .ok_or(ClusterError::InvariantViolation {
                point,
                cluster: self.id,
            })?;
        self.members.remove(pos);
        self.calc_centroid(points);
        Ok(())
    }

    /// Drop every member. Leaves the points unassigned, so only use it when
    /// the caller is about to redistribute them.
    pub fn clear_nodes(&mut self) {
        self.members.clear();
        self.centroid = (0.0, 0.0);
    }

    /// Paint every member with the cluster's own color
    pub fn set_color(&self, points: &mut [Point]) {
        self.set_color_to(self.color, points);
    }

    pub fn set_color_to(&self, color: Color, points: &mut [Point]) {
        for id in self.members.iter() {
            points[*id].color = color;
        }
    }

    /// Distance from the centroid to the farthest member
    pub fn radius(&self, points: &[Point]) -> Option<f64> {
        self.points(points)
            .map(|p| distance(self.centroid, p.xy()))
            .fold(None, |max: Option<f64>, d| match max {
                Some(m) if m >= d => Some(m),
                _ => Some(d),
            })
    }
}
