//! 対局（棋譜木＋現在局面＋カーソル）
//!
//! `Game` の局面は常に「初期局面に根からカーソルまでの指し手を適用したもの」に等しい。

mod tree;

pub use tree::{GameTree, Node, NodeId};

use crate::error::InvariantError;
use crate::moves::Move;
use crate::position::Position;

/// 対局
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    tree: GameTree,
    initial: Position,
    position: Position,
    cursor: NodeId,
    headers: Vec<(String, String)>,
}

impl Game {
    /// 初期局面から始まる空の棋譜
    pub fn new(initial: Position) -> Self {
        Game {
            tree: GameTree::new(),
            position: initial.clone(),
            initial,
            cursor: NodeId::ROOT,
            headers: Vec::new(),
        }
    }

    /// 初期局面を差し替えて棋譜を空にする（ヘッダーは残す）
    pub fn reset(&mut self, initial: Position) {
        self.tree = GameTree::new();
        self.position = initial.clone();
        self.initial = initial;
        self.cursor = NodeId::ROOT;
    }

    #[inline]
    pub fn tree(&self) -> &GameTree {
        &self.tree
    }

    /// 現在局面
    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// 初期局面
    #[inline]
    pub fn initial_position(&self) -> &Position {
        &self.initial
    }

    #[inline]
    pub fn cursor(&self) -> NodeId {
        self.cursor
    }

    /// カーソル位置のノード
    #[inline]
    pub fn current_node(&self) -> &Node {
        self.tree.node(self.cursor)
    }

    /// カーソル位置に指し手を追加して進める
    ///
    /// 同じ指し手の変化が既にあればそのノードへ進む。
    pub fn add_move(&mut self, mv: Move) -> Result<NodeId, InvariantError> {
        self.position.make_move(&mv)?;
        self.cursor = self.tree.add_child(self.cursor, mv);
        Ok(self.cursor)
    }

    /// 本譜を 1 手進める（末端なら false）
    pub fn next(&mut self) -> Result<bool, InvariantError> {
        self.next_variation(0)
    }

    /// `index` 番目の変化を 1 手進める（なければ false）
    pub fn next_variation(&mut self, index: usize) -> Result<bool, InvariantError> {
        let Some(&child) = self.tree.node(self.cursor).variations().get(index) else {
            return Ok(false);
        };
        self.position.make_move(self.tree.node(child).mv())?;
        self.cursor = child;
        Ok(true)
    }

    /// 1 手戻す（根なら false）
    pub fn prev(&mut self) -> Result<bool, InvariantError> {
        if self.cursor.is_root() {
            return Ok(false);
        }
        let node = self.tree.node(self.cursor);
        self.position.unmake_move(node.mv())?;
        self.cursor = node.parent();
        Ok(true)
    }

    /// 初期局面まで戻す
    pub fn go_to_start(&mut self) -> Result<(), InvariantError> {
        while self.prev()? {}
        Ok(())
    }

    /// 本譜の末端まで進める
    pub fn go_to_end(&mut self) -> Result<(), InvariantError> {
        while self.next()? {}
        Ok(())
    }

    /// 任意のノードへ移動する
    pub fn go_to(&mut self, id: NodeId) -> Result<(), InvariantError> {
        self.go_to_start()?;
        for step in self.tree.path_to(id) {
            self.position.make_move(self.tree.node(step).mv())?;
            self.cursor = step;
        }
        Ok(())
    }

    /// 第 `n` 手を指す直前まで戻す（変化の読み込み用）
    ///
    /// 現在の手順上に第 `n` 手がなければ何もせず false を返す。
    pub fn rewind_before(&mut self, n: u32) -> Result<bool, InvariantError> {
        let mut target = self.cursor;
        while self.tree.node(target).move_number() > n {
            target = self.tree.node(target).parent();
        }
        if n == 0 || self.tree.node(target).move_number() != n {
            return Ok(false);
        }
        while self.cursor != target {
            self.prev()?;
        }
        self.prev()?;
        Ok(true)
    }

    /// カーソル位置のノードの指し手（根なら None）
    pub fn last_move(&self) -> Option<&Move> {
        if self.cursor.is_root() { None } else { Some(self.tree.node(self.cursor).mv()) }
    }

    /// 根から本譜をたどった指し手
    pub fn mainline_moves(&self) -> Vec<Move> {
        self.tree.mainline_from(NodeId::ROOT).map(|id| *self.tree.node(id).mv()).collect()
    }

    /// 根からカーソルまでの指し手
    pub fn current_line(&self) -> Vec<Move> {
        self.tree.path_to(self.cursor).into_iter().map(|id| *self.tree.node(id).mv()).collect()
    }

    /// 変化を本譜にする（カーソルと局面は変わらない）
    pub fn promote_variation(&mut self, id: NodeId) {
        self.tree.promote_variation(id);
    }

    /// カーソル位置のノードにコメントを追記する
    pub fn add_comment(&mut self, text: &str) {
        self.tree.append_comment(self.cursor, text);
    }

    /// ヘッダー（挿入順）
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// ヘッダーを設定する（同じキーは上書き）
    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.headers.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.headers.push((key, value)),
        }
    }

    /// USI の position コマンド引数（`sfen <初期局面> moves ...`）
    ///
    /// 根からカーソルまでの手を並べる。終局理由の手は含めない。
    pub fn to_usi_position(&self) -> String {
        let mut out = format!("sfen {}", self.initial.to_sfen());
        let moves: Vec<String> = self
            .current_line()
            .iter()
            .filter(|m| !m.is_termination())
            .map(Move::to_usi)
            .collect();
        if !moves.is_empty() {
            out.push_str(" moves ");
            out.push_str(&moves.join(" "));
        }
        out
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new(Position::startpos())
    }
}
