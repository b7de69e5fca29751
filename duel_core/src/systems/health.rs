use hecs::World;

use crate::components::{HealthBar, Health, Ship};

/// Copy each ship's health onto its side's health bar
pub fn sync_health_bars(world: &mut World) {
    let mut healths = [None; 2];
    for (_entity, (ship, health)) in world.query::<(&Ship, &Health)>().iter() {
        healths[ship.side.index()] = Some(health.current());
    }

    for (_entity, bar) in world.query_mut::<&mut HealthBar>() {
        if let Some(value) = healths[bar.side.index()] {
            bar.value = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::side::Side;

    #[test]
    fn test_bars_follow_their_own_ship() {
        let mut world = World::new();
        world.spawn((Ship::new(Side::Yellow, 5), Health::at(3, 10)));
        world.spawn((Ship::new(Side::Red, 5), Health::at(8, 10)));
        let yellow_bar = world.spawn((HealthBar {
            side: Side::Yellow,
            value: 10,
            unit_width: 10,
        },));
        let red_bar = world.spawn((HealthBar {
            side: Side::Red,
            value: 10,
            unit_width: 10,
        },));

        sync_health_bars(&mut world);

        assert_eq!(world.get::<&HealthBar>(yellow_bar).unwrap().value, 3);
        assert_eq!(world.get::<&HealthBar>(red_bar).unwrap().value, 8);
        assert_eq!(world.get::<&HealthBar>(red_bar).unwrap().fill_width(), 80);
    }
}
