/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Read-only access to vendor JSON trees.
//!
//! Statement documents have no fixed schema: the same field may sit at a
//! different depth for different symbols, or be missing, or carry a string
//! where a number is expected. Everything here answers with `Option` and
//! never panics on shape.

use serde_json::Value;

/// Default recursion limit for tree searches
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// `Option`-returning accessors over a JSON node
pub trait NodeExt {
  /// Child of a map node
  fn field(&self, key: &str) -> Option<&Value>;

  /// Finite JSON number under `key`. Strings are not coerced.
  fn number(&self, key: &str) -> Option<f64>;

  /// String under `key`
  fn text(&self, key: &str) -> Option<&str>;

  /// Elements of a list node
  fn items(&self) -> Option<&[Value]>;

  /// Follow a key path through nested maps
  fn path(&self, keys: &[&str]) -> Option<&Value>;
}

impl NodeExt for Value {
  fn field(&self, key: &str) -> Option<&Value> {
    self.as_object()?.get(key)
  }

  fn number(&self, key: &str) -> Option<f64> {
    self.field(key)?.as_f64().filter(|n| n.is_finite())
  }

  fn text(&self, key: &str) -> Option<&str> {
    self.field(key)?.as_str()
  }

  fn items(&self) -> Option<&[Value]> {
    self.as_array().map(Vec::as_slice)
  }

  fn path(&self, keys: &[&str]) -> Option<&Value> {
    keys.iter().try_fold(self, |node, key| node.field(key))
  }
}

/// Depth-first, pre-order walk over every node down to `max_depth`.
///
/// The root is depth 0. Map children are visited in key order, list children
/// in index order.
pub fn walk<'a, F>(root: &'a Value, max_depth: usize, visit: &mut F)
where
  F: FnMut(&'a Value),
{
  walk_at(root, 0, max_depth, visit);
}

fn walk_at<'a, F>(node: &'a Value, depth: usize, max_depth: usize, visit: &mut F)
where
  F: FnMut(&'a Value),
{
  if depth > max_depth {
    return;
  }
  visit(node);
  match node {
    Value::Object(map) => {
      map.values().for_each(|child| walk_at(child, depth + 1, max_depth, visit))
    }
    Value::Array(items) => {
      items.iter().for_each(|child| walk_at(child, depth + 1, max_depth, visit))
    }
    _ => {}
  }
}

/// Every list reachable as `<map>.<path>` from any map in the tree, in walk order
pub fn lists_at_path<'a>(root: &'a Value, path: &[&str], max_depth: usize) -> Vec<&'a [Value]> {
  let mut lists = Vec::new();
  walk(root, max_depth, &mut |node| {
    if let Some(list) = node.path(path).and_then(NodeExt::items) {
      lists.push(list);
    }
  });
  lists
}

/// First list reachable as `<map>.<path>` in walk order
pub fn first_list_at_path<'a>(
  root: &'a Value,
  path: &[&str],
  max_depth: usize,
) -> Option<&'a [Value]> {
  lists_at_path(root, path, max_depth).into_iter().next()
}
