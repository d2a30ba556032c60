use std::collections::HashMap;
use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};
use rand::Rng;

use crate::config::ConstellationConfig;
use crate::util::lerp;

use super::field::{DotId, GridField};
use super::metaballs::Metaball;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightNode {
    pub dot: DotId,
    pub radius: f32,
    pub target_radius: f32,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightLine {
    pub start: DotId,
    pub end: DotId,
    pub progress: f32,
}

impl HighlightLine {
    pub fn joins(&self, a: DotId, b: DotId) -> bool {
        (self.start == a && self.end == b) || (self.start == b && self.end == a)
    }
}

#[derive(Debug)]
pub struct Constellation {
    metaball: usize,
    nodes: Vec<HighlightNode>,
    lines: Vec<HighlightLine>,
}

impl Constellation {
    pub fn new(metaball: usize) -> Self {
        Self {
            metaball,
            nodes: Vec::new(),
            lines: Vec::new(),
        }
    }

    pub fn metaball_index(&self) -> usize {
        self.metaball
    }

    pub fn nodes(&self) -> &[HighlightNode] {
        &self.nodes
    }

    pub fn lines(&self) -> &[HighlightLine] {
        &self.lines
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.lines.clear();
    }

    pub fn node_for(&self, dot: DotId) -> Option<&HighlightNode> {
        self.nodes.iter().find(|node| node.dot == dot)
    }

    pub fn contains_dot(&self, dot: DotId) -> bool {
        self.node_for(dot).is_some()
    }

    pub fn update(
        &mut self,
        metaball: &Metaball,
        field: &GridField,
        config: &ConstellationConfig,
        rng: &mut impl Rng,
    ) {
        if rng.random::<f64>() < config.node_add_chance && self.nodes.len() < config.max_nodes {
            self.grow(metaball, field, config, rng);
        }

        self.update_nodes(metaball, field, config);
        self.prune(metaball, field, config);
        self.ensure_connectivity(field);
        self.advance_lines(config);
    }

    pub fn grow(
        &mut self,
        metaball: &Metaball,
        field: &GridField,
        config: &ConstellationConfig,
        rng: &mut impl Rng,
    ) -> Option<DotId> {
        if self.nodes.len() >= config.max_nodes {
            return None;
        }

        let angle = rng.random::<f32>() * TAU;
        let distance = rng.random::<f32>() * config.influence_radius;
        let target = metaball.position + vec2(angle.cos(), angle.sin()) * distance;

        let dot = field.nearest_dot(target)?;
        let target_radius = lerp(
            config.max_highlight_radius * 0.5,
            config.max_highlight_radius,
            rng.random::<f32>(),
        );
        self.add_node(dot, target_radius)?;

        if self.nodes.len() > 1 {
            let existing = &self.nodes[..self.nodes.len() - 1];
            if let Some(nearest) = nearest_node(field, dot, existing) {
                self.add_line(dot, nearest);
            }
        }

        Some(dot)
    }

    pub fn add_node(&mut self, dot: DotId, target_radius: f32) -> Option<usize> {
        if self.contains_dot(dot) {
            return None;
        }

        self.nodes.push(HighlightNode {
            dot,
            radius: 0.0,
            target_radius,
            opacity: 0.0,
        });
        Some(self.nodes.len() - 1)
    }

    pub fn add_line(&mut self, a: DotId, b: DotId) -> bool {
        if a == b || self.lines.iter().any(|line| line.joins(a, b)) {
            return false;
        }

        self.lines.push(HighlightLine {
            start: a,
            end: b,
            progress: 0.0,
        });
        true
    }

    fn update_nodes(&mut self, metaball: &Metaball, field: &GridField, config: &ConstellationConfig) {
        for node in &mut self.nodes {
            let Some(dot) = field.dot(node.dot) else {
                continue;
            };

            let distance = (dot.position - metaball.position).length();
            let influence = (1.0 - distance / config.influence_radius).max(0.0);
            node.opacity = lerp(
                node.opacity,
                influence * config.max_opacity,
                config.ease_factor,
            );
            node.radius = lerp(
                node.radius,
                node.target_radius * influence,
                config.ease_factor,
            );
        }
    }

    fn prune(&mut self, metaball: &Metaball, field: &GridField, config: &ConstellationConfig) {
        let limit = config.prune_radius();
        self.nodes.retain(|node| {
            field
                .dot(node.dot)
                .is_some_and(|dot| (dot.position - metaball.position).length() <= limit)
        });

        let nodes = &self.nodes;
        let present = |dot: DotId| nodes.iter().any(|node| node.dot == dot);
        self.lines
            .retain(|line| present(line.start) && present(line.end));
    }

    pub fn connected_components(&self) -> Vec<Vec<usize>> {
        let index_by_dot = self
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (node.dot, index))
            .collect::<HashMap<_, _>>();

        let mut adjacency = vec![Vec::new(); self.nodes.len()];
        for line in &self.lines {
            if let (Some(&start), Some(&end)) =
                (index_by_dot.get(&line.start), index_by_dot.get(&line.end))
            {
                adjacency[start].push(end);
                adjacency[end].push(start);
            }
        }

        let mut visited = vec![false; self.nodes.len()];
        let mut components = Vec::new();
        let mut stack = Vec::new();
        for root in 0..self.nodes.len() {
            if visited[root] {
                continue;
            }

            let mut component = Vec::new();
            visited[root] = true;
            stack.push(root);
            while let Some(index) = stack.pop() {
                component.push(index);
                for &next in &adjacency[index] {
                    if !visited[next] {
                        visited[next] = true;
                        stack.push(next);
                    }
                }
            }
            components.push(component);
        }

        components
    }

    pub fn ensure_connectivity(&mut self, field: &GridField) {
        if self.nodes.len() < 2 {
            return;
        }

        let components = self.connected_components();
        let Some((anchor, rest)) = components.split_first() else {
            return;
        };

        for component in rest {
            if let Some((a, b)) = self.nearest_pair(field, anchor, component) {
                self.add_line(a, b);
            }
        }
    }

    fn nearest_pair(
        &self,
        field: &GridField,
        left: &[usize],
        right: &[usize],
    ) -> Option<(DotId, DotId)> {
        let mut best = None;
        let mut best_distance_sq = f32::INFINITY;

        for &i in left {
            let a = self.nodes[i].dot;
            let Some(a_pos) = dot_position(field, a) else {
                continue;
            };
            for &j in right {
                let b = self.nodes[j].dot;
                let Some(b_pos) = dot_position(field, b) else {
                    continue;
                };
                let distance_sq = (a_pos - b_pos).length_sq();
                if distance_sq < best_distance_sq {
                    best_distance_sq = distance_sq;
                    best = Some((a, b));
                }
            }
        }

        best
    }

    fn advance_lines(&mut self, config: &ConstellationConfig) {
        for line in &mut self.lines {
            line.progress += (1.0 - line.progress) * config.ease_factor;
        }
    }
}

fn dot_position(field: &GridField, id: DotId) -> Option<Vec2> {
    field.dot(id).map(|dot| dot.position)
}

fn nearest_node(field: &GridField, dot: DotId, nodes: &[HighlightNode]) -> Option<DotId> {
    let origin = dot_position(field, dot)?;
    let mut nearest = None;
    let mut nearest_distance_sq = f32::INFINITY;

    for node in nodes {
        let Some(position) = dot_position(field, node.dot) else {
            continue;
        };
        let distance_sq = (position - origin).length_sq();
        if distance_sq < nearest_distance_sq {
            nearest_distance_sq = distance_sq;
            nearest = Some(node.dot);
        }
    }

    nearest
}
