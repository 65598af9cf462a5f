use super::{Require, SystemBase};
use crate::comp::ComponentTypes;
use crate::test_util::{Position, Velocity};
use crate::{Entity, Signature};

#[test]
fn test_require_sets_bits() {
    let mut types = ComponentTypes::default();
    let mut req = Require::new(&mut types);
    req.require_component::<Velocity>().require_component::<Position>();
    let signature = req.finish();

    let velocity = types.get::<Velocity>().expect("registered by require_component");
    let position = types.get::<Position>().expect("registered by require_component");
    assert_eq!(signature, [velocity, position].into_iter().collect::<Signature>());
}

#[test]
fn test_members_keep_order_on_removal() {
    let mut base = SystemBase::default();
    for id in [5, 2, 9, 7] {
        assert!(base.add_entity(Entity::from_id(id)));
    }
    assert!(!base.add_entity(Entity::from_id(9)), "members are not duplicated");

    assert!(base.remove_entity(Entity::from_id(2)));
    assert!(!base.remove_entity(Entity::from_id(2)));
    assert!(!base.remove_entity(Entity::from_id(100)));

    let ids: Vec<_> = base.entities().iter().map(|entity| entity.id()).collect();
    assert_eq!(ids, vec![5, 9, 7]);
    assert!(base.contains(Entity::from_id(7)));
    assert!(!base.contains(Entity::from_id(2)));
}

#[test]
fn test_empty_signature_interested_in_everything() {
    let base = SystemBase::new(Signature::new());
    assert!(base.is_interested(&Signature::new()));
}
