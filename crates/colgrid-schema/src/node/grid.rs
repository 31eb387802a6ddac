use crate::prelude::*;

///
/// GridNode
/// Entity-level grid annotation: the row actions to render.
///

#[derive(Clone, Copy, Debug, Serialize)]
pub struct GridNode {
    pub actions: &'static [ActionNode],
}

impl From<&GridNode> for GridAnnotation {
    fn from(node: &GridNode) -> Self {
        Self {
            actions: node.actions.iter().map(ActionDeclaration::from).collect(),
        }
    }
}

///
/// ActionNode
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct ActionNode {
    pub label: &'static str,
    pub route: &'static str,
    pub kind: ActionNodeKind,
}

impl From<&ActionNode> for ActionDeclaration {
    fn from(node: &ActionNode) -> Self {
        let kind = match node.kind {
            ActionNodeKind::Show => DeclaredAction::Show,
            ActionNodeKind::Delete => DeclaredAction::Delete,
            ActionNodeKind::Custom(name) => DeclaredAction::Custom(name.to_string()),
        };

        Self::new(node.label, node.route, kind)
    }
}

///
/// ActionNodeKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum ActionNodeKind {
    Custom(&'static str),
    Delete,
    Show,
}
