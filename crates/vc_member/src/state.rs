use vc_reflect::info::{MemberInfo, MemberKind};
use vc_scene::ObjectId;

// -----------------------------------------------------------------------------
// SourceKind

/// What a binding resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SourceKind {
    /// Not reflected yet.
    #[default]
    Unknown,
    Field,
    Property,
    Method,
}

impl From<MemberKind> for SourceKind {
    #[inline]
    fn from(kind: MemberKind) -> Self {
        match kind {
            MemberKind::Field => Self::Field,
            MemberKind::Property => Self::Property,
            MemberKind::Method => Self::Method,
        }
    }
}

// -----------------------------------------------------------------------------
// BindingStage

/// How far a binding has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BindingStage {
    Unresolved,
    /// The object reflection runs against is known.
    Targeted,
    /// The member is known.
    Reflected,
}

// -----------------------------------------------------------------------------
// BindingState

/// The cached results of a binding.
///
/// A member is only ever cached together with the target it was found on.
#[derive(Debug, Clone, Default)]
pub(crate) struct BindingState {
    target: Option<ObjectId>,
    member: Option<MemberInfo>,
}

impl BindingState {
    #[inline]
    pub fn stage(&self) -> BindingStage {
        match (self.target, &self.member) {
            (None, _) => BindingStage::Unresolved,
            (Some(_), None) => BindingStage::Targeted,
            (Some(_), Some(_)) => BindingStage::Reflected,
        }
    }

    #[inline]
    pub fn resolved_target(&self) -> Option<ObjectId> {
        self.target
    }

    #[inline]
    pub fn member(&self) -> Option<&MemberInfo> {
        self.member.as_ref()
    }

    /// Drops the target and the member.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Caches a freshly resolved target, dropping the member.
    #[inline]
    pub fn target(&mut self, target: ObjectId) {
        self.target = Some(target);
        self.member = None;
    }

    /// Removes the cached member, keeps the target.
    #[inline]
    pub fn take_member(&mut self) -> Option<MemberInfo> {
        self.member.take()
    }

    /// Drops the member, keeps the target.
    #[inline]
    pub fn forget_member(&mut self) {
        self.member = None;
    }

    /// Caches `member` found on `target` and returns it.
    pub fn reflect(&mut self, target: ObjectId, member: MemberInfo) -> &MemberInfo {
        self.target = Some(target);
        self.member.insert(member)
    }
}
