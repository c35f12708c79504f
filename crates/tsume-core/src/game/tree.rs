//! 分岐付きの棋譜木
//!
//! ノードは `Vec` に格納し、親子は添字で参照する。
//! 添字 0 は番兵の根で、自分自身を親に持つ。

use crate::moves::Move;

/// ノードの添字
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// 根
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }

    #[inline]
    pub const fn is_root(self) -> bool {
        self.0 == 0
    }
}

/// 棋譜木のノード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    mv: Move,
    parent: NodeId,
    move_number: u32,
    comment: String,
    variations: Vec<NodeId>,
}

impl Node {
    /// このノードに至る指し手（根は `Move::NULL`）
    #[inline]
    pub fn mv(&self) -> &Move {
        &self.mv
    }

    #[inline]
    pub fn parent(&self) -> NodeId {
        self.parent
    }

    /// 手数（根は 0）
    #[inline]
    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    #[inline]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// 子ノード（先頭が本譜）
    #[inline]
    pub fn variations(&self) -> &[NodeId] {
        &self.variations
    }
}

/// 棋譜木
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameTree {
    nodes: Vec<Node>,
}

impl GameTree {
    /// 根だけの木
    pub fn new() -> Self {
        let root = Node {
            mv: Move::NULL,
            parent: NodeId::ROOT,
            move_number: 0,
            comment: String::new(),
            variations: Vec::new(),
        };
        GameTree { nodes: vec![root] }
    }

    /// ノード数（根を含む）
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// 根しかないかどうか
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// ノード
    ///
    /// # Panics
    /// 別の木の添字を渡したとき
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// 子を追加する。同じ指し手の子が既にあればそれを返す
    pub fn add_child(&mut self, parent: NodeId, mv: Move) -> NodeId {
        if let Some(&existing) =
            self.nodes[parent.0].variations.iter().find(|&&c| self.nodes[c.0].mv == mv)
        {
            return existing;
        }
        let id = NodeId(self.nodes.len());
        let move_number = self.nodes[parent.0].move_number + 1;
        self.nodes.push(Node {
            mv,
            parent,
            move_number,
            comment: String::new(),
            variations: Vec::new(),
        });
        self.nodes[parent.0].variations.push(id);
        id
    }

    /// 本譜の子（先頭の変化）
    #[inline]
    pub fn main_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].variations.first().copied()
    }

    /// コメントを追記する（既存のコメントとは改行で区切る）
    pub fn append_comment(&mut self, id: NodeId, text: &str) {
        let comment = &mut self.nodes[id.0].comment;
        if !comment.is_empty() {
            comment.push('\n');
        }
        comment.push_str(text);
    }

    /// 変化を兄弟の先頭に移して本譜にする
    ///
    /// 根から `id` までの全ての祖先についても同様に先頭へ移す。
    pub fn promote_variation(&mut self, id: NodeId) {
        let mut child = id;
        while !child.is_root() {
            let parent = self.nodes[child.0].parent;
            let siblings = &mut self.nodes[parent.0].variations;
            if let Some(pos) = siblings.iter().position(|&c| c == child) {
                siblings[..=pos].rotate_right(1);
            }
            child = parent;
        }
    }

    /// 根から `id` までの経路（根は含まない）
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut cur = id;
        while !cur.is_root() {
            path.push(cur);
            cur = self.nodes[cur.0].parent;
        }
        path.reverse();
        path
    }

    /// `id` から本譜をたどった指し手（`id` 自身の手は含まない）
    pub fn mainline_from(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.main_child(id), move |&n| self.main_child(n))
    }
}

impl Default for GameTree {
    fn default() -> Self {
        Self::new()
    }
}
