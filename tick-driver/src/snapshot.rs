//! Final picture of a run: cluster summary as JSON and a scatter plot as SVG

use std::{fs, path::Path};

use kmeans_live::{Color, Engine, types::DARKER_PERCENT};
use plotlib::{
    page::Page,
    repr::Plot,
    style::{PointMarker, PointStyle},
    view::ContinuousView,
};
use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ClusterSnapshot {
    pub id: usize,
    pub centroid: (f64, f64),
    pub color: Color,
    pub radius: Option<f64>,
    pub members: Vec<(f64, f64)>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RunSnapshot {
    pub ticks: usize,
    pub settled: bool,
    pub clusters: Vec<ClusterSnapshot>,
}

impl RunSnapshot {
    pub fn capture(engine: &Engine, ticks: usize, settled: bool) -> Self {
        let clusters = engine
            .clusters()
            .iter()
            .map(|cluster| ClusterSnapshot {
                id: cluster.id,
                centroid: cluster.centroid(),
                color: cluster.color(),
                radius: cluster.radius(engine.points()),
                members: cluster.points(engine.points()).map(|p| p.xy()).collect(),
            })
            .collect();
        Self {
            ticks,
            settled,
            clusters,
        }
    }

    pub fn write_json(&self, path: &Path) -> Result<(), String> {
        let text = serde_json::to_string_pretty(self)
            .map_err(|e| format!("failed to encode snapshot: {}", e))?;
        fs::write(path, text).map_err(|e| format!("failed to write {}: {}", path.display(), e))
    }

    /// One point series per non-empty cluster in its own color, centroids in a darker shade
    pub fn write_svg(&self, path: &Path, extent: f64) -> Result<(), String> {
        let mut view = ContinuousView::new()
            .x_range(0.0, extent)
            .y_range(0.0, extent)
            .x_label("x")
            .y_label("y");
        for cluster in self.clusters.iter().filter(|c| !c.members.is_empty()) {
            let members = Plot::new(cluster.members.clone()).point_style(
                PointStyle::new()
                    .marker(PointMarker::Circle)
                    .colour(cluster.color.to_hex())
                    .size(2.0_f32),
            );
            let centroid = Plot::new(vec![cluster.centroid]).point_style(
                PointStyle::new()
                    .marker(PointMarker::Square)
                    .colour(cluster.color.darker(DARKER_PERCENT).to_hex())
                    .size(4.0_f32),
            );
            view = view.add(members).add(centroid);
        }
        Page::single(&view)
            .save(path)
            .map_err(|e| format!("failed to save {}: {}", path.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kmeans_live::EngineContext;

    #[test]
    fn capture_mirrors_engine() {
        let points = vec![(0.0, 0.0), (2.0, 0.0), (9.0, 9.0)];
        let groups = vec![vec![0, 1], vec![2]];
        let engine = Engine::from_partition(points, groups, EngineContext::new(0)).unwrap();
        let snapshot = RunSnapshot::capture(&engine, 3, true);
        assert_eq!(snapshot.ticks, 3);
        assert_eq!(snapshot.clusters.len(), 2);
        assert_eq!(snapshot.clusters[0].centroid, (1.0, 0.0));
        assert_eq!(snapshot.clusters[0].radius, Some(1.0));
        assert_eq!(snapshot.clusters[0].members, vec![(0.0, 0.0), (2.0, 0.0)]);
        assert_eq!(snapshot.clusters[1].color, engine.clusters()[1].color());
    }
}
