#[cfg(test)]
mod tests {
    use crate::catalog::template;
    use crate::commands::Order;
    use crate::enums::*;
    use crate::events::{EventPayload, SimEvent};
    use crate::state::{UnitView, WorldSnapshot};
    use crate::types::{Position, UnitSpawn};

    #[test]
    fn test_unit_kind_wire_names() {
        let names: Vec<String> = UnitKind::ALL
            .iter()
            .map(|k| serde_json::to_string(k).unwrap())
            .collect();
        assert_eq!(names, vec!["\"RECON\"", "\"INFANTRY\"", "\"MBT\"", "\"ARTILLERY\""]);
    }

    #[test]
    fn test_side_wire_names_and_opponent() {
        assert_eq!(serde_json::to_string(&Side::Blue).unwrap(), "\"BLUE\"");
        assert_eq!(serde_json::to_string(&Side::Red).unwrap(), "\"RED\"");
        assert_eq!(Side::Blue.opponent(), Side::Red);
        assert_eq!(Side::Red.opponent(), Side::Blue);
    }

    #[test]
    fn test_catalog_roles() {
        let recon = template(UnitKind::Recon);
        let inf = template(UnitKind::Infantry);
        let mbt = template(UnitKind::Mbt);
        let arty = template(UnitKind::Artillery);

        // Recon has the best sensors and is the hardest to see.
        for other in [inf, mbt, arty] {
            assert!(recon.sensor_range_m > other.sensor_range_m);
            assert!(recon.visibility < other.visibility);
        }
        assert_eq!(recon.weapon, WeaponClass::SmallArms);
        assert_eq!(recon.aoe_radius_m, 0.0);

        assert_eq!(inf.weapon, WeaponClass::AntiTank);
        assert!(inf.aoe_radius_m > 0.0);

        assert_eq!(mbt.weapon, WeaponClass::DirectFire);
        assert_eq!(mbt.armor, 3);
        assert_eq!(mbt.max_hp, 150.0);
        assert_eq!(mbt.base_damage, 50.0);
        assert_eq!(mbt.cep_m, 5.0);
        assert_eq!(mbt.reload_s, 6.0);
        assert_eq!(mbt.aoe_radius_m, 0.0);

        assert_eq!(arty.weapon, WeaponClass::IndirectFire);
        assert!(arty.weapon_range_m > mbt.weapon_range_m);
        for other in [recon, inf, mbt] {
            assert!(arty.aoe_radius_m > other.aoe_radius_m);
            assert!(arty.cep_m > other.cep_m);
            assert!(arty.reload_s > other.reload_s);
        }
    }

    #[test]
    fn test_only_indirect_fire_skips_direct_detection() {
        assert!(WeaponClass::DirectFire.needs_direct_detection());
        assert!(WeaponClass::SmallArms.needs_direct_detection());
        assert!(WeaponClass::AntiTank.needs_direct_detection());
        assert!(!WeaponClass::IndirectFire.needs_direct_detection());
    }

    #[test]
    fn test_order_wire_format() {
        let json = r#"[
            {"kind": "move", "unitId": "B-MBT-1", "targetPos": [4000.0, 5000.0]},
            {"kind": "attack", "unitId": "B-MBT-1", "targetUnitId": "R-MBT-1"},
            {"kind": "stop", "unitId": "B-MBT-1"},
            {"kind": "defend", "unitId": "B-MBT-2"}
        ]"#;
        let orders: Vec<Order> = serde_json::from_str(json).unwrap();
        assert_eq!(orders[0], Order::move_to("B-MBT-1", 4000.0, 5000.0));
        assert_eq!(orders[1], Order::attack("B-MBT-1", "R-MBT-1"));
        assert_eq!(orders[2], Order::stop("B-MBT-1"));
        assert_eq!(orders[3], Order::stop("B-MBT-2"));
        assert_eq!(orders[3].unit_id(), "B-MBT-2");
        assert_eq!(orders[1].kind(), OrderKind::Attack);
    }

    #[test]
    fn test_event_wire_format() {
        let event = SimEvent::new(
            15_000,
            EventPayload::Routed {
                unit_id: "R-INF-1".into(),
            },
        );
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "simTimeMs": 15000,
                "kind": "Routed",
                "data": { "unitId": "R-INF-1" }
            })
        );
        assert_eq!(event.kind(), "Routed");
    }

    #[test]
    fn test_impact_event_carries_visualization_fields() {
        let event = SimEvent::new(
            0,
            EventPayload::Impact {
                shooter: "B-ARTY-1".into(),
                target: "R-INF-1".into(),
                point: Position::new(10.0, 20.0),
                miss_distance_m: 12.5,
                weapon: WeaponClass::IndirectFire,
                aoe_radius_m: 50.0,
            },
        );
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["data"]["point"], serde_json::json!([10.0, 20.0]));
        assert_eq!(value["data"]["missDistanceM"], 12.5);
        assert_eq!(value["data"]["weapon"], "indirect_fire");
        assert_eq!(value["data"]["aoeRadiusM"], 50.0);
    }

    #[test]
    fn test_snapshot_wire_format() {
        let mut snapshot = WorldSnapshot {
            sim_clock_ms: 500,
            ..Default::default()
        };
        snapshot.units.insert(
            "B-RECON-1".into(),
            UnitView {
                id: "B-RECON-1".into(),
                side: Side::Blue,
                unit_type_id: UnitKind::Recon,
                pos: Position::new(1000.0, 5000.0),
                hp: 50.0,
                ammo: 200,
                routed: false,
                intent_target_pos: None,
                target_unit_id: None,
                spotted_by: vec![],
            },
        );
        let value = serde_json::to_value(&snapshot).unwrap();
        let unit = &value["units"]["B-RECON-1"];
        assert_eq!(value["simClockMs"], 500);
        assert_eq!(unit["unitTypeId"], "RECON");
        assert_eq!(unit["pos"], serde_json::json!([1000.0, 5000.0]));
        assert!(unit["intentTargetPos"].is_null());
        assert!(unit["targetUnitId"].is_null());
        assert_eq!(snapshot.side(Side::Blue).count(), 1);
        assert_eq!(snapshot.side(Side::Red).count(), 0);
    }

    #[test]
    fn test_unit_spawn_defaults_from_json() {
        let spawn: UnitSpawn = serde_json::from_str(
            r#"{"id": "R-ARTY-1", "side": "RED", "unitTypeId": "ARTILLERY", "pos": [9500, 5000]}"#,
        )
        .unwrap();
        assert_eq!(
            spawn,
            UnitSpawn::new("R-ARTY-1", Side::Red, UnitKind::Artillery, 9500.0, 5000.0)
        );
        assert!(spawn.hp.is_none());
        assert!(spawn.ammo.is_none());
    }
}
