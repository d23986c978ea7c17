//! Editing operations over an owned element tree.
//!
//! A page layout is a `Vec<Element>` of roots. Every child is owned by
//! exactly one parent; `parent_id` is kept as a cached copy of that
//! relationship and is rewritten by every operation here.

use crate::element::{Element, StyleMap};
use crate::errors::{CoreError, Result};
use std::collections::HashSet;

/// Find an element anywhere in the tree.
pub fn find<'a>(elements: &'a [Element], id: &str) -> Option<&'a Element> {
    for element in elements {
        if element.id == id {
            return Some(element);
        }
        if let Some(found) = find(&element.children, id) {
            return Some(found);
        }
    }
    None
}

/// Find an element anywhere in the tree, mutably.
pub fn find_mut<'a>(elements: &'a mut [Element], id: &str) -> Option<&'a mut Element> {
    for element in elements {
        if element.id == id {
            return Some(element);
        }
        if let Some(found) = find_mut(&mut element.children, id) {
            return Some(found);
        }
    }
    None
}

/// Insert `element` under `parent_id` (or at the root when `None`).
///
/// `index` defaults to appending; out-of-range indices append.
pub fn insert(
    elements: &mut Vec<Element>,
    parent_id: Option<&str>,
    index: Option<usize>,
    mut element: Element,
) -> Result<()> {
    element.parent_id = parent_id.map(str::to_string);
    sync_children(&mut element);

    let siblings = match parent_id {
        None => elements,
        Some(pid) => {
            &mut find_mut(elements, pid)
                .ok_or_else(|| CoreError::ElementNotFound(pid.to_string()))?
                .children
        }
    };
    let at = index.unwrap_or(siblings.len()).min(siblings.len());
    siblings.insert(at, element);
    Ok(())
}

/// Remove an element together with its whole subtree.
pub fn remove(elements: &mut Vec<Element>, id: &str) -> Result<Element> {
    if let Some(pos) = elements.iter().position(|e| e.id == id) {
        return Ok(elements.remove(pos));
    }
    for element in elements.iter_mut() {
        if let Ok(removed) = remove(&mut element.children, id) {
            return Ok(removed);
        }
    }
    Err(CoreError::ElementNotFound(id.to_string()))
}

/// Move an element (with its subtree) under a new parent.
pub fn move_element(
    elements: &mut Vec<Element>,
    id: &str,
    new_parent: Option<&str>,
    index: Option<usize>,
) -> Result<()> {
    if let Some(target) = new_parent {
        let moving = find(elements, id).ok_or_else(|| CoreError::ElementNotFound(id.to_string()))?;
        if find(std::slice::from_ref(moving), target).is_some() {
            return Err(CoreError::MoveIntoDescendant {
                id: id.to_string(),
                target: target.to_string(),
            });
        }
        if find(elements, target).is_none() {
            return Err(CoreError::ElementNotFound(target.to_string()));
        }
    }

    let element = remove(elements, id)?;
    insert(elements, new_parent, index, element)
}

/// Merge style declarations into an element, overwriting existing keys.
pub fn update_styles(elements: &mut [Element], id: &str, styles: StyleMap) -> Result<()> {
    let element = find_mut(elements, id).ok_or_else(|| CoreError::ElementNotFound(id.to_string()))?;
    element.styles.extend(styles);
    Ok(())
}

/// Rewrite every `parent_id` from the actual tree structure.
pub fn sync_parent_ids(elements: &mut [Element]) {
    for element in elements {
        element.parent_id = None;
        sync_children(element);
    }
}

fn sync_children(element: &mut Element) {
    for child in &mut element.children {
        child.parent_id = Some(element.id.clone());
        sync_children(child);
    }
}

/// Check that every recorded `parent_id` matches the tree structure.
pub fn check_parent_ids(elements: &[Element]) -> Result<()> {
    fn check(elements: &[Element], parent: Option<&str>) -> Result<()> {
        for element in elements {
            if element.parent_id.as_deref() != parent {
                return Err(CoreError::ParentMismatch {
                    id: element.id.clone(),
                    recorded: element.parent_id.clone(),
                    actual: parent.map(str::to_string),
                });
            }
            check(&element.children, Some(&element.id))?;
        }
        Ok(())
    }
    check(elements, None)
}

/// Collect every id in pre-order, failing on the first duplicate.
pub fn collect_ids(elements: &[Element]) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    let mut duplicate = None;
    for root in elements {
        root.walk(&mut |e: &Element| {
            if !seen.insert(e.id.clone()) && duplicate.is_none() {
                duplicate = Some(e.id.clone());
            }
            ids.push(e.id.clone());
        });
    }
    match duplicate {
        Some(id) => Err(CoreError::DuplicateElementId(id)),
        None => Ok(ids),
    }
}
