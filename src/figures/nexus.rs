//! Finance-Energy-Transport (FET) nexus diagram
//!
//! A fixed three-node graph showing how the state's roles as financier,
//! energy buyer and transport regulator feed each other.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NexusNode {
    Finance,
    Energy,
    Transport,
}

impl NexusNode {
    pub const ALL: [NexusNode; 3] = [Self::Finance, Self::Energy, Self::Transport];

    pub fn position(&self) -> (f64, f64) {
        match self {
            Self::Finance => (0.0, 1.0),
            Self::Energy => (1.0, 0.0),
            Self::Transport => (0.0, -1.0),
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Finance => "#2E86AB",
            Self::Energy => "#C73E1D",
            Self::Transport => "#6B8F71",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeLayout {
    pub node: NexusNode,
    pub x: f64,
    pub y: f64,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NexusLink {
    pub from: NexusNode,
    pub to: NexusNode,
    pub label: String,
    /// Arrow color follows the source node
    pub color: String,
    pub label_x: f64,
    pub label_y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetNexus {
    pub title: String,
    pub nodes: Vec<NodeLayout>,
    pub links: Vec<NexusLink>,
}

const LINKS: [(NexusNode, NexusNode, &str); 6] = [
    (NexusNode::Finance, NexusNode::Energy, "De-risking investments"),
    (NexusNode::Finance, NexusNode::Transport, "LROMA guidance"),
    (NexusNode::Energy, NexusNode::Finance, "Price stability (CfD)"),
    (NexusNode::Energy, NexusNode::Transport, "Fuel cost"),
    (NexusNode::Transport, NexusNode::Finance, "FMIP returns"),
    (NexusNode::Transport, NexusNode::Energy, "Hydrogen demand"),
];

pub fn build_fet_nexus() -> FetNexus {
    let nodes = NexusNode::ALL
        .iter()
        .map(|node| {
            let (x, y) = node.position();
            NodeLayout {
                node: *node,
                x,
                y,
                color: node.color().to_string(),
            }
        })
        .collect();

    let links = LINKS
        .iter()
        .map(|&(from, to, label)| {
            let (x1, y1) = from.position();
            let (x2, y2) = to.position();
            let (label_x, label_y) = label_position(from, to, (x1 + x2) / 2.0, (y1 + y2) / 2.0);
            NexusLink {
                from,
                to,
                label: label.to_string(),
                color: from.color().to_string(),
                label_x,
                label_y,
            }
        })
        .collect();

    FetNexus {
        title: "Finance-Energy-Transport (FET) Nexus: Systems Integration".to_string(),
        nodes,
        links,
    }
}

/// Offset the label from the edge midpoint so opposing arrows do not overlap
fn label_position(from: NexusNode, to: NexusNode, mid_x: f64, mid_y: f64) -> (f64, f64) {
    let touches = |node| from == node || to == node;
    let offset_y = if touches(NexusNode::Finance) && touches(NexusNode::Energy) {
        -0.1
    } else {
        0.1
    };
    (mid_x + 0.1, mid_y + offset_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nexus_shape() {
        let nexus = build_fet_nexus();
        assert_eq!(nexus.nodes.len(), 3);
        assert_eq!(nexus.links.len(), 6);
    }

    #[test]
    fn test_every_ordered_pair_linked_once() {
        let nexus = build_fet_nexus();
        for from in NexusNode::ALL {
            for to in NexusNode::ALL {
                let count = nexus
                    .links
                    .iter()
                    .filter(|l| l.from == from && l.to == to)
                    .count();
                assert_eq!(count, usize::from(from != to));
            }
        }
    }

    #[test]
    fn test_link_color_follows_source() {
        let nexus = build_fet_nexus();
        let link = nexus
            .links
            .iter()
            .find(|l| l.label == "FMIP returns")
            .unwrap();
        assert_eq!(link.from, NexusNode::Transport);
        assert_eq!(link.color, "#6B8F71");
    }

    #[test]
    fn test_label_offsets() {
        let nexus = build_fet_nexus();
        let finance_energy = &nexus.links[0];
        assert!((finance_energy.label_x - 0.6).abs() < 1e-12);
        assert!((finance_energy.label_y - 0.4).abs() < 1e-12);

        let energy_transport = &nexus.links[3];
        assert!((energy_transport.label_y - (-0.4)).abs() < 1e-12);
    }
}
