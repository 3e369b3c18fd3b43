#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use vc_member as member;
pub use vc_reflect as reflect;
pub use vc_scene as scene;

pub use vc_member::{MemberBinding, MemberError, TypedMember};
