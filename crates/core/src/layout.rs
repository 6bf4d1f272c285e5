//! Text layout for grids
//!
//! A grid can be written as a table of short tokens, top row first, the way it
//! is drawn on screen:
//!
//! | Token | Meaning |
//! |-------|---------|
//! | `""` or `"."` | empty cell |
//! | `X<n>` | ordinary block of palette colour `n` |
//! | `S<n>` | active-shape block |
//! | `P<n>` | active-shape block at the rotation origin |
//! | `W<n>` | wall |
//! | `J<n>` | jewel |
//!
//! The colour digit is a palette index `0`-`5` and defaults to `0`. Shape tokens
//! become a single `Custom` active shape, so they need exactly one `P`.
//!
//! ```
//! use blockfall_core::BlockGrid;
//!
//! let grid = BlockGrid::from_tokens(&[
//!     ["", "P2", "S2"],
//!     ["X1", "", "W"],
//! ])
//! .unwrap();
//! assert_eq!(grid.rows(), 2);
//! assert!(grid.shape().is_some());
//! assert_eq!(grid.to_tokens()[1], vec!["X1", ".", "W0"]);
//! ```

use std::fmt;

use crate::block::Block;
use crate::grid::{BlockGrid, GridError};
use crate::shape::{KickTable, Shape};
use crate::types::{BlockColour, BlockType, GridReference, ShapeName};

/// One parsed token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Token {
    kind: BlockType,
    colour: BlockColour,
    origin: bool,
}

fn parse_token(token: &str) -> Option<Option<Token>> {
    let token = token.trim();
    if token.is_empty() || token == "." {
        return Some(None);
    }
    let mut chars = token.chars();
    let role = chars.next()?;
    let kind = BlockType::from_token_char(role)?;
    let colour = match chars.next() {
        Some(digit) => BlockColour::from_index(digit.to_digit(10)? as usize)?,
        None => BlockColour::Red,
    };
    if chars.next().is_some() {
        return None;
    }
    Some(Some(Token {
        kind,
        colour,
        origin: role.eq_ignore_ascii_case(&'P'),
    }))
}

impl BlockGrid {
    /// Build a grid from a token table, top row first
    pub fn from_tokens<R, S>(layout: &[R]) -> Result<BlockGrid, GridError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let height = layout.len();
        let width = layout.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(GridError::InvalidDimensions {
                rows: height,
                columns: width,
            });
        }

        let mut cells = vec![vec![None; width]; height];
        let mut shape_cells: Vec<(GridReference, BlockColour)> = Vec::new();
        let mut origin: Option<GridReference> = None;

        for (line, tokens) in layout.iter().enumerate() {
            let tokens = tokens.as_ref();
            if tokens.len() != width {
                return Err(GridError::RaggedRows {
                    row: line,
                    expected: width,
                    found: tokens.len(),
                });
            }
            let row = height - 1 - line;
            for (column, raw) in tokens.iter().enumerate() {
                let raw = raw.as_ref();
                let parsed = parse_token(raw).ok_or_else(|| GridError::InvalidToken {
                    token: raw.to_string(),
                    line,
                    column,
                })?;
                let Some(token) = parsed else {
                    continue;
                };
                let reference = GridReference::new(row as i32, column as i32);
                if token.kind == BlockType::Shape {
                    shape_cells.push((reference, token.colour));
                    if token.origin && origin.replace(reference).is_some() {
                        return Err(GridError::MultipleOrigins);
                    }
                }
                cells[row][column] = Some(Block::new(token.colour, token.kind));
            }
        }

        let mut grid = BlockGrid::from_rows(cells)?;
        if !shape_cells.is_empty() {
            let origin = origin.ok_or(GridError::MissingOrigin)?;
            let relative = shape_cells
                .iter()
                .map(|(r, _)| GridReference::ORIGIN.offset(origin.offset_to(*r)))
                .collect();
            let colours = shape_cells.iter().map(|(_, c)| *c).collect();
            let mut shape = Shape::new(
                ShapeName::Custom,
                relative,
                colours,
                KickTable::standard(),
                true,
            )?;
            shape.move_to(origin);
            grid.install_shape(shape);
        }
        Ok(grid)
    }

    /// Token table for the current contents, top row first
    pub fn to_tokens(&self) -> Vec<Vec<String>> {
        let origin = self.player_origin();
        (0..self.rows())
            .rev()
            .map(|row| {
                (0..self.columns())
                    .map(|column| {
                        let reference = GridReference::new(row as i32, column as i32);
                        match self.block_at(reference) {
                            None => ".".to_string(),
                            Some(block) => {
                                let role = if block.is_shape() && origin == Some(reference) {
                                    'P'
                                } else {
                                    block.kind().token_char()
                                };
                                format!("{}{}", role, block.colour().index())
                            }
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for BlockGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tokens in self.to_tokens() {
            let line: Vec<String> = tokens.iter().map(|t| format!("{:>2}", t)).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_are_listed_top_first() {
        let grid = BlockGrid::from_tokens(&[["X1", ""], ["", "J3"]]).unwrap();
        let top = grid.block_at(GridReference::new(1, 0)).unwrap();
        assert_eq!(top.colour(), BlockColour::Orange);
        let jewel = grid.block_at(GridReference::new(0, 1)).unwrap();
        assert!(jewel.is_jewel());
        assert_eq!(jewel.colour(), BlockColour::Green);
    }

    #[test]
    fn test_colour_defaults_to_first_palette_entry() {
        let grid = BlockGrid::from_tokens(&[["W"]]).unwrap();
        let wall = grid.block_at(GridReference::ORIGIN).unwrap();
        assert!(wall.is_wall());
        assert_eq!(wall.colour(), BlockColour::Red);
    }

    #[test]
    fn test_shape_tokens_build_active_shape() {
        let grid = BlockGrid::from_tokens(&[[".", "S4", "."], ["S4", "P4", "S4"]]).unwrap();
        let shape = grid.shape().unwrap();
        assert_eq!(shape.name(), ShapeName::Custom);
        assert_eq!(shape.len(), 4);
        assert_eq!(grid.player_origin(), Some(GridReference::new(0, 1)));
    }

    #[test]
    fn test_shape_tokens_require_one_origin() {
        assert_eq!(
            BlockGrid::from_tokens(&[["S1", "S1"]]).unwrap_err(),
            GridError::MissingOrigin
        );
        assert_eq!(
            BlockGrid::from_tokens(&[["P1", "P1"]]).unwrap_err(),
            GridError::MultipleOrigins
        );
    }

    #[test]
    fn test_invalid_tokens() {
        for bad in ["Q1", "X9", "X12", "Xa"] {
            let err = BlockGrid::from_tokens(&[[bad, ""]]).unwrap_err();
            assert!(matches!(err, GridError::InvalidToken { .. }), "{bad}");
        }
    }

    #[test]
    fn test_ragged_layout() {
        let layout: Vec<Vec<&str>> = vec![vec!["", ""], vec![""]];
        assert!(matches!(
            BlockGrid::from_tokens(&layout),
            Err(GridError::RaggedRows { row: 1, .. })
        ));
    }

    #[test]
    fn test_tokens_survive_a_round_trip() {
        let layout = [["S0", "P0", "."], ["X1", "W2", "J5"]];
        let grid = BlockGrid::from_tokens(&layout).unwrap();
        let tokens = grid.to_tokens();
        let again = BlockGrid::from_tokens(&tokens).unwrap();
        assert_eq!(again.to_tokens(), tokens);
        assert_eq!(tokens[0], vec!["S0", "P0", "."]);
        assert!(grid.to_string().contains("W2"));
    }
}
