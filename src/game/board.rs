use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::color::{Color, TRACK_LEN};
use crate::error::BoardError;

/// Cells per home stretch on the standard board.
pub const DEFAULT_HOME_STRETCH_LEN: usize = 6;

/// Safe shared-track cells on the standard board: every start cell and the
/// cell eight steps past it.
pub const SAFE_CELLS: [usize; 8] = [0, 8, 13, 21, 26, 34, 39, 47];

/// Identity of a board position. Shared-track cells are `0..52`, home
/// stretches follow in color order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn new(index: usize) -> Self {
        NodeId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Track,
    HomeStretch(Color),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    safe: bool,
    next: Option<NodeId>,
    home_branch: Option<(Color, NodeId)>,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_safe(&self) -> bool {
        self.safe
    }

    /// Shared successor, `None` past the last cell of a home stretch.
    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    /// Branch into a home stretch, and the only color allowed to take it.
    pub fn home_branch(&self) -> Option<(Color, NodeId)> {
        self.home_branch
    }
}

/// The immutable position graph: a 52-cell cycle plus one linear home
/// stretch per color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    nodes: Vec<Node>,
    home_stretch_len: usize,
}

impl Board {
    /// Board with the standard layout.
    pub fn standard() -> Self {
        BoardBuilder::new()
            .build()
            .expect("standard board layout is valid")
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn home_stretch_len(&self) -> usize {
        self.home_stretch_len
    }

    /// The next position for a token of `color` standing on `node`.
    ///
    /// Takes the home branch only at `color`'s own entry; every other color
    /// continues along the shared track. Returns `None` after the final cell
    /// of a home stretch (stepping there means arrival) or for unknown ids.
    pub fn successor(&self, node: NodeId, color: Color) -> Option<NodeId> {
        let node = self.node(node)?;
        match node.home_branch {
            Some((owner, branch)) if owner == color => Some(branch),
            _ => node.next,
        }
    }

    pub fn is_safe(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(Node::is_safe)
    }

    pub fn is_track(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(|n| n.kind == NodeKind::Track)
    }

    pub fn start_node(&self, color: Color) -> NodeId {
        NodeId(color.start_cell())
    }

    pub fn home_entry(&self, color: Color) -> NodeId {
        NodeId(color.home_entry_cell())
    }

    /// Cells of `color`'s home stretch, entry side first.
    pub fn home_stretch(&self, color: Color) -> Vec<NodeId> {
        let first = TRACK_LEN + color.index() * self.home_stretch_len;
        (first..first + self.home_stretch_len).map(NodeId).collect()
    }

    /// Steps a token of `color` on `node` needs to arrive, counting the final
    /// step past the last home cell.
    pub fn steps_to_arrival(&self, node: NodeId, color: Color) -> Option<u32> {
        let mut current = node;
        let mut steps = 0u32;
        // Any walk longer than the node count has looped.
        for _ in 0..=self.nodes.len() {
            steps += 1;
            match self.successor(current, color) {
                Some(next) => current = next,
                None => return Some(steps),
            }
        }
        None
    }

    /// Steps from leaving base to arrival for `color`, the base exit included.
    pub fn full_path_len(&self, color: Color) -> u32 {
        self.steps_to_arrival(self.start_node(color), color)
            .map_or(0, |steps| steps + 1)
    }

    /// Number of steps, within `1..=max_steps`, after which a token of
    /// `color` on `from` would stand on `to`.
    pub fn distance_along(
        &self,
        from: NodeId,
        to: NodeId,
        color: Color,
        max_steps: u32,
    ) -> Option<u32> {
        let mut current = from;
        for steps in 1..=max_steps {
            current = self.successor(current, color)?;
            if current == to {
                return Some(steps);
            }
        }
        None
    }

    /// Check the graph invariants: one closed shared cycle, one home branch
    /// per color at its entry, disjoint linear stretches of legal length.
    pub fn validate(&self) -> Result<(), BoardError> {
        self.validate_track()?;

        let mut seen_branches = HashSet::new();
        for node in &self.nodes[..TRACK_LEN] {
            if let Some((color, _)) = node.home_branch {
                if node.id != self.home_entry(color) {
                    return Err(BoardError::StrayHomeBranch { node: node.id });
                }
                seen_branches.insert(color);
            }
        }

        let mut claimed = HashSet::new();
        for color in Color::ALL {
            if !seen_branches.contains(&color) {
                return Err(BoardError::MissingHomeBranch(color));
            }
            self.validate_stretch(color, &mut claimed)?;
        }

        Ok(())
    }

    fn validate_track(&self) -> Result<(), BoardError> {
        let origin = NodeId(0);
        if self.nodes.len() < TRACK_LEN {
            return Err(BoardError::TrackNotCyclic(origin));
        }

        let mut visited = HashSet::with_capacity(TRACK_LEN);
        let mut current = origin;
        for _ in 0..TRACK_LEN {
            if !self.is_track(current) || !visited.insert(current) {
                return Err(BoardError::TrackNotCyclic(current));
            }
            current = self
                .node(current)
                .and_then(Node::next)
                .ok_or(BoardError::TrackNotCyclic(current))?;
        }

        if current != origin {
            return Err(BoardError::TrackNotCyclic(current));
        }
        Ok(())
    }

    fn validate_stretch(
        &self,
        color: Color,
        claimed: &mut HashSet<NodeId>,
    ) -> Result<(), BoardError> {
        let malformed = |reason: String| BoardError::MalformedHomeStretch { color, reason };

        let entry = self.home_entry(color);
        let mut cursor = self
            .node(entry)
            .and_then(Node::home_branch)
            .map(|(_, branch)| branch);
        let mut len = 0;

        while let Some(id) = cursor {
            let node = self
                .node(id)
                .ok_or_else(|| malformed(format!("cell {id} does not exist")))?;
            if node.kind != NodeKind::HomeStretch(color) {
                return Err(malformed(format!("cell {id} is not part of this stretch")));
            }
            if node.home_branch.is_some() {
                return Err(malformed(format!("cell {id} branches")));
            }
            if !claimed.insert(id) {
                return Err(malformed(format!("cell {id} is reached twice")));
            }
            len += 1;
            if len > DEFAULT_HOME_STRETCH_LEN {
                return Err(malformed(format!("longer than {DEFAULT_HOME_STRETCH_LEN} cells")));
            }
            cursor = node.next;
        }

        if len < 5 {
            return Err(malformed(format!("only {len} cells long")));
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

/// Builds a [`Board`], checking the graph before handing it out.
#[derive(Debug, Clone)]
pub struct BoardBuilder {
    home_stretch_len: usize,
    safe_cells: Vec<usize>,
}

impl BoardBuilder {
    pub fn new() -> Self {
        BoardBuilder {
            home_stretch_len: DEFAULT_HOME_STRETCH_LEN,
            safe_cells: SAFE_CELLS.to_vec(),
        }
    }

    pub fn home_stretch_len(mut self, len: usize) -> Self {
        self.home_stretch_len = len;
        self
    }

    pub fn safe_cells(mut self, cells: impl IntoIterator<Item = usize>) -> Self {
        self.safe_cells = cells.into_iter().collect();
        self
    }

    pub fn build(self) -> Result<Board, BoardError> {
        let len = self.home_stretch_len;
        if !(5..=DEFAULT_HOME_STRETCH_LEN).contains(&len) {
            return Err(BoardError::HomeStretchLength(len));
        }
        if let Some(&cell) = self.safe_cells.iter().find(|&&c| c >= TRACK_LEN) {
            return Err(BoardError::SafeCellOutOfRange(cell));
        }

        let mut nodes: Vec<Node> = (0..TRACK_LEN)
            .map(|i| Node {
                id: NodeId(i),
                kind: NodeKind::Track,
                safe: self.safe_cells.contains(&i),
                next: Some(NodeId((i + 1) % TRACK_LEN)),
                home_branch: None,
            })
            .collect();

        for color in Color::ALL {
            let first = nodes.len();
            for k in 0..len {
                nodes.push(Node {
                    id: NodeId(first + k),
                    kind: NodeKind::HomeStretch(color),
                    safe: true,
                    next: (k + 1 < len).then_some(NodeId(first + k + 1)),
                    home_branch: None,
                });
            }
            nodes[color.home_entry_cell()].home_branch = Some((color, NodeId(first)));
        }

        let board = Board {
            nodes,
            home_stretch_len: len,
        };
        board.validate()?;
        log::debug!(
            "built board: {} cells, home stretch length {}",
            board.nodes.len(),
            len
        );
        Ok(board)
    }
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}
