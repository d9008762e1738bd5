//! Builder für Render-Szenen aus dem AppState.

use crate::app::AppState;
use crate::shared::{ConnectionLine, FulcrumMarker, GridOverlay, PreviewLine, RenderScene};

/// Baut eine RenderScene aus dem aktuellen AppState.
pub fn build(state: &AppState) -> RenderScene {
    let view = &state.view;

    let fulcrums = state
        .graph
        .fulcrums()
        .map(|fulcrum| FulcrumMarker {
            id: fulcrum.id,
            name: fulcrum.name.clone(),
            kind: fulcrum.kind,
            display: view.display_position(fulcrum.position),
        })
        .collect();

    // Gruppierung wird pro Frame neu abgeleitet
    let connections = state
        .graph
        .connection_groups()
        .into_iter()
        .filter_map(|group| {
            let (start, end) = group.endpoints();
            let start = state.graph.fulcrum(start)?;
            let end = state.graph.fulcrum(end)?;
            Some(ConnectionLine {
                group,
                start: view.display_position(start.position),
                end: view.display_position(end.position),
            })
        })
        .collect();

    let preview = state
        .editor
        .gesture
        .temp_connection()
        .map(|temp| PreviewLine {
            from: temp.from,
            start: temp.from_pos,
            end: temp.to_pos,
        });

    let grid = view.grid.enabled.then(|| {
        let rect = view.image_rect;
        let offset = view.grid.offset();
        GridOverlay {
            vertical: view
                .grid
                .line_positions(offset.x)
                .into_iter()
                .map(|x| rect.origin.x + x * rect.size.x)
                .collect(),
            horizontal: view
                .grid
                .line_positions(offset.y)
                .into_iter()
                .map(|y| rect.origin.y + y * rect.size.y)
                .collect(),
            handle: view.display_position(offset),
        }
    });

    RenderScene {
        svg_plan: state.svg_plan.clone(),
        image_rect: view.image_rect,
        scale: view.viewport.scale,
        offset: view.viewport.offset,
        fulcrums,
        connections,
        preview,
        grid,
    }
}

#[cfg(test)]
mod tests {
    use super::build;
    use crate::app::AppState;
    use crate::core::{Connection, Fulcrum, FulcrumType, WaypointGraph};
    use approx::assert_relative_eq;
    use glam::DVec2;

    fn state() -> AppState {
        let mut state = AppState::new();
        state.view.container_size = DVec2::new(800.0, 600.0);
        state.view.plan_size = DVec2::new(800.0, 600.0);
        state.view.refit();
        state.graph = WaypointGraph::new(1);
        for (id, x) in [(1, 0.1), (2, 0.5), (3, 0.9)] {
            state.graph.upsert_fulcrum(Fulcrum::new(
                id,
                1,
                DVec2::new(x, 0.5),
                format!("F{id}"),
                FulcrumType::Room,
            ));
        }
        state
    }

    #[test]
    fn build_groups_pairs_into_one_line() {
        let mut state = state();
        state.graph.insert_connection(Connection::new(1, 2, 1.0));
        state.graph.insert_connection(Connection::new(2, 1, 2.0));
        state.graph.insert_connection(Connection::new(2, 3, 1.0));

        let scene = build(&state);

        assert_eq!(scene.fulcrums.len(), 3);
        assert_eq!(scene.connections.len(), 2);
        let bidirectional = scene
            .connections
            .iter()
            .filter(|line| line.group.is_bidirectional())
            .count();
        assert_eq!(bidirectional, 1);
    }

    #[test]
    fn build_places_markers_in_display_space() {
        let state = state();

        let scene = build(&state);

        let marker = scene
            .fulcrums
            .iter()
            .find(|m| m.id == 2)
            .expect("Marker 2 sollte existieren");
        assert_relative_eq!(marker.display.x, 400.0, epsilon = 1e-9);
        assert_relative_eq!(marker.display.y, 300.0, epsilon = 1e-9);
        assert!(scene.preview.is_none());
        assert!(!scene.has_plan());
    }

    #[test]
    fn build_grid_overlay_only_when_enabled() {
        let mut state = state();
        assert!(build(&state).grid.is_none());

        state.view.grid.enabled = true;
        let grid = build(&state).grid.expect("Raster-Overlay erwartet");

        let expected = (1.0 / state.view.grid.step()).round() as usize + 1;
        assert_eq!(grid.vertical.len(), expected);
        assert_relative_eq!(grid.vertical[0], 0.0, epsilon = 1e-9);
        assert_eq!(grid.handle, DVec2::ZERO);
    }
}
