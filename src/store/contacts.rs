//! XML-backed contact store with exact-match lookup and upsert.

use std::env;
use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use xmltree::{Element, XMLNode};

use crate::contact::Contact;

/// Default document file name, resolved against the application directory.
pub const DATA_FILE: &str = "ContactList.xml";

const CONTACT_ELEM: &str = "contact";
const FIRST_ATTR: &str = "first";
const LAST_ATTR: &str = "last";
const FIRST_ELEM: &str = "first";
const LAST_ELEM: &str = "last";
const EMAIL_ELEM: &str = "email";

/// Failure to construct a store from a document file.
///
/// Fatal to [`ContactStore::load`]: without a parsed document there is no
/// store to operate on.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be opened or read.
    Io(io::Error),
    /// The file is not a well-formed document.
    Parse(xmltree::ParseError),
}

impl From<io::Error> for LoadError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<xmltree::ParseError> for LoadError {
    fn from(value: xmltree::ParseError) -> Self {
        Self::Parse(value)
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read contact document: {err}"),
            Self::Parse(err) => write!(f, "failed to parse contact document: {err}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

/// Failure to serialize the document back to disk.
///
/// Returned by [`ContactStore::save`]; callers are free to ignore it.
#[derive(Debug)]
pub enum SaveError {
    /// The target file could not be created.
    Io(io::Error),
    /// The document could not be emitted.
    Xml(xmltree::Error),
}

impl From<io::Error> for SaveError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<xmltree::Error> for SaveError {
    fn from(value: xmltree::Error) -> Self {
        Self::Xml(value)
    }
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to write contact document: {err}"),
            Self::Xml(err) => write!(f, "failed to emit contact document: {err}"),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Xml(err) => Some(err),
        }
    }
}

/// Child-index path from the document root to a located contact node.
type NodePath = Vec<usize>;

/// In-memory contact document with exact-match lookup and upsert.
///
/// Each stored contact is a `<contact>` element carrying `first`/`last`
/// attributes plus `<first>`/`<last>`/`<email>` child text elements holding
/// the same values. Lookups match on the attributes; field reads come from
/// the child elements. The store assumes, without enforcing, that no two
/// nodes share a `(first, last)` key.
///
/// `contains`/`get`/`put` search the whole subtree; [`ContactStore::get_all`]
/// enumerates only direct children of the root. The asymmetry is part of the
/// contract.
#[derive(Debug)]
pub struct ContactStore {
    root: Element,
    path: PathBuf,
    // last-lookup cache; reused only after its key attributes re-verify
    cached: Option<NodePath>,
}

impl ContactStore {
    /// Parses the document at `path` into memory.
    ///
    /// Relative paths resolve against the application's own directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = resolve(path.as_ref());
        let file = File::open(&path)?;
        let root = Element::parse(file)?;
        info!("loaded contact document from {}", path.display());
        Ok(Self {
            root,
            path,
            cached: None,
        })
    }

    /// True when a contact with exactly this key exists anywhere under the
    /// document root. Refreshes the last-lookup cache as a side effect.
    pub fn contains(&mut self, first: &str, last: &str) -> bool {
        self.locate(first, last).is_some()
    }

    /// Returns the contact with exactly this key, or `None` when absent.
    ///
    /// Fields are read from the child elements; a missing child yields `""`.
    pub fn get(&mut self, first: &str, last: &str) -> Option<Contact> {
        let path = self.locate(first, last)?;
        node_at(&self.root, &path).map(to_contact)
    }

    /// All contacts that are direct children of the document root, in
    /// document order.
    ///
    /// Deliberately narrower than `contains`/`get`/`put`: contact nodes
    /// nested deeper in the tree are findable by key but never enumerated.
    pub fn get_all(&self) -> Vec<Contact> {
        self.root
            .children
            .iter()
            .filter_map(XMLNode::as_element)
            .filter(|el| el.name == CONTACT_ELEM)
            .map(to_contact)
            .collect()
    }

    /// Upserts by `(first_name, last_name)` and reports success.
    ///
    /// When a node with the key exists its `<email>` child text is replaced,
    /// creating the child if absent. Otherwise a new `<contact>` carrying
    /// both the attribute pair and the three child elements is appended as
    /// the last top-level child. Never panics.
    pub fn put(&mut self, contact: &Contact) -> bool {
        if let Some(path) = self.locate(&contact.first_name, &contact.last_name) {
            let Some(node) = node_at_mut(&mut self.root, &path) else {
                return false;
            };
            set_child_text(node, EMAIL_ELEM, &contact.email);
            return true;
        }
        self.root
            .children
            .push(XMLNode::Element(new_contact_node(contact)));
        true
    }

    /// Writes the document back to the file it was loaded from.
    pub fn save(&self) -> Result<(), SaveError> {
        self.write_to(&self.path)
    }

    /// Writes the document to `path`, resolved against the application
    /// directory when relative.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        self.write_to(&resolve(path.as_ref()))
    }

    fn write_to(&self, path: &Path) -> Result<(), SaveError> {
        let file = File::create(path)?;
        self.root.write(file)?;
        debug!("saved contact document to {}", path.display());
        Ok(())
    }

    /// Cache-first lookup. The cached node is reused only when it still
    /// resolves and its key attributes equal the requested key; otherwise a
    /// full descendant search runs and the cache is replaced, or cleared on
    /// a miss.
    fn locate(&mut self, first: &str, last: &str) -> Option<NodePath> {
        if let Some(path) = self.cached.as_ref() {
            let verified = node_at(&self.root, path).is_some_and(|node| key_matches(node, first, last));
            if verified {
                return Some(path.clone());
            }
        }

        let mut path = Vec::new();
        let found = search_descendants(&self.root, first, last, &mut path);
        self.cached = found.then(|| path.clone());
        found.then_some(path)
    }
}

/// Depth-first search for a `<contact>` whose key attributes match exactly.
/// On success `path` holds the child-index route from the root.
fn search_descendants(el: &Element, first: &str, last: &str, path: &mut NodePath) -> bool {
    for (idx, node) in el.children.iter().enumerate() {
        let Some(child) = node.as_element() else {
            continue;
        };
        path.push(idx);
        if child.name == CONTACT_ELEM && key_matches(child, first, last) {
            return true;
        }
        if search_descendants(child, first, last, path) {
            return true;
        }
        path.pop();
    }
    false
}

fn key_matches(el: &Element, first: &str, last: &str) -> bool {
    el.attributes.get(FIRST_ATTR).is_some_and(|v| v == first)
        && el.attributes.get(LAST_ATTR).is_some_and(|v| v == last)
}

fn node_at<'a>(root: &'a Element, path: &NodePath) -> Option<&'a Element> {
    let mut el = root;
    for &idx in path {
        el = el.children.get(idx)?.as_element()?;
    }
    Some(el)
}

fn node_at_mut<'a>(root: &'a mut Element, path: &NodePath) -> Option<&'a mut Element> {
    let mut el = root;
    for &idx in path {
        el = el.children.get_mut(idx)?.as_mut_element()?;
    }
    Some(el)
}

fn to_contact(el: &Element) -> Contact {
    Contact {
        first_name: child_text(el, FIRST_ELEM),
        last_name: child_text(el, LAST_ELEM),
        email: child_text(el, EMAIL_ELEM),
    }
}

fn child_text(el: &Element, name: &str) -> String {
    el.get_child(name)
        .and_then(|child| child.get_text())
        .map(|text| text.into_owned())
        .unwrap_or_default()
}

fn set_child_text(el: &mut Element, name: &str, value: &str) {
    match el.get_mut_child(name) {
        Some(child) => set_text(child, value),
        None => {
            let mut child = Element::new(name);
            set_text(&mut child, value);
            el.children.push(XMLNode::Element(child));
        }
    }
}

fn set_text(el: &mut Element, value: &str) {
    el.children
        .retain(|node| !matches!(node, XMLNode::Text(_) | XMLNode::CData(_)));
    el.children.push(XMLNode::Text(value.to_string()));
}

fn new_contact_node(contact: &Contact) -> Element {
    let mut node = Element::new(CONTACT_ELEM);
    node.attributes
        .insert(FIRST_ATTR.to_string(), contact.first_name.clone());
    node.attributes
        .insert(LAST_ATTR.to_string(), contact.last_name.clone());
    set_child_text(&mut node, FIRST_ELEM, &contact.first_name);
    set_child_text(&mut node, LAST_ELEM, &contact.last_name);
    set_child_text(&mut node, EMAIL_ELEM, &contact.email);
    node
}

fn resolve(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    app_dir().join(path)
}

fn app_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
