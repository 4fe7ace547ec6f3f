//! Conditional Block Tree
//!
//! Models the `#if ... #endif` nesting of a header so that blocks whose
//! contents were filtered away can be dropped as a whole. Blocks live in an
//! arena and refer to each other by index; the parent link is only used while
//! the tree is being built.

use gl3w_core::{Error, Result};

/// Index of a block in the tree arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockId(usize);

/// A child of a conditional block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Line(String),
    Block(BlockId),
}

#[derive(Debug, Clone, Default)]
struct Block {
    parent: Option<BlockId>,
    children: Vec<Child>,
}

/// Tree of conditional blocks with the implicit root at index 0
#[derive(Debug, Clone)]
pub struct IfdefTree {
    blocks: Vec<Block>,
    current: BlockId,
    /// Line number of the `#if` that opened each block, for diagnostics
    opened_at: Vec<usize>,
}

const ROOT: BlockId = BlockId(0);

impl IfdefTree {
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::default()],
            current: ROOT,
            opened_at: vec![0],
        }
    }

    /// Append a line to the current block
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.blocks[self.current.0].children.push(Child::Line(line.into()));
    }

    /// Open a nested block whose first child is the `#if` guard
    pub fn open(&mut self, guard: impl Into<String>, line_no: usize) {
        let id = BlockId(self.blocks.len());
        self.blocks.push(Block {
            parent: Some(self.current),
            children: vec![Child::Line(guard.into())],
        });
        self.opened_at.push(line_no);
        self.blocks[self.current.0].children.push(Child::Block(id));
        self.current = id;
    }

    /// Close the current block with its `#endif` guard
    pub fn close(&mut self, guard: impl Into<String>, line_no: usize) -> Result<()> {
        let parent = self.blocks[self.current.0]
            .parent
            .ok_or_else(|| Error::parse(line_no, "#endif without matching #if"))?;
        self.push_line(guard);
        self.current = parent;
        Ok(())
    }

    /// Check that every opened block was closed
    pub fn finish(&self) -> Result<()> {
        if self.current == ROOT {
            return Ok(());
        }
        Err(Error::parse(
            self.opened_at[self.current.0],
            "#if without matching #endif",
        ))
    }

    /// Drop every block left with nothing but its guards.
    ///
    /// Children are pruned before their parent is judged. Returns the number
    /// of blocks removed, nested ones included.
    pub fn cull_empty(&mut self) -> usize {
        let mut culled = 0;
        self.cull_block(ROOT, &mut culled);
        culled
    }

    fn cull_block(&mut self, id: BlockId, culled: &mut usize) -> bool {
        let children = std::mem::take(&mut self.blocks[id.0].children);
        let mut kept = Vec::with_capacity(children.len());

        for child in children {
            match child {
                Child::Line(_) => kept.push(child),
                Child::Block(nested) => {
                    if self.cull_block(nested, culled) {
                        kept.push(child);
                    } else {
                        *culled += 1 + self.count_blocks(nested);
                    }
                }
            }
        }

        let survives = kept.len() > 2;
        self.blocks[id.0].children = kept;
        survives
    }

    fn count_blocks(&self, id: BlockId) -> usize {
        self.blocks[id.0]
            .children
            .iter()
            .map(|child| match child {
                Child::Line(_) => 0,
                Child::Block(nested) => 1 + self.count_blocks(*nested),
            })
            .sum()
    }

    /// Lines of the tree in source order, depth first
    pub fn lines(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.gather(ROOT, &mut out);
        out
    }

    fn gather<'a>(&'a self, id: BlockId, out: &mut Vec<&'a str>) {
        for child in &self.blocks[id.0].children {
            match child {
                Child::Line(line) => out.push(line),
                Child::Block(nested) => self.gather(*nested, out),
            }
        }
    }

    /// Reassemble the tree into newline-joined text
    pub fn to_text(&self) -> String {
        self.lines().join("\n")
    }
}

impl Default for IfdefTree {
    fn default() -> Self {
        Self::new()
    }
}
