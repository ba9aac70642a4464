//! Built-in weapon specs: structural parts, damaging parts, decorations and
//! the weapons assembled from them.

use super::materials::{
    GEMS, HANDLE_MATERIALS, HANDLE_MATERIAL_WEIGHTS, PRECIOUS_METALS, WEAPON_METALS,
    WEAPON_METAL_WEIGHTS,
};
use crate::choice::ChoiceSpec;
use crate::spec::{AttributeRule, ComponentRule, DamageAxis, DamageDecl, SpecDecl};

use DamageAxis::{Crush, Pierce, Slice};

fn weapon_metals() -> ChoiceSpec<String> {
    ChoiceSpec::weighted_values(WEAPON_METALS, WEAPON_METAL_WEIGHTS.to_vec())
}

/// A weighted addition slot; `None` entries mean "no decoration".
fn addition(options: &[(Option<&str>, f64)]) -> ChoiceSpec<Option<String>> {
    ChoiceSpec::weighted(
        options
            .iter()
            .map(|(name, _)| ChoiceSpec::Terminal(name.map(str::to_string)))
            .collect(),
        options.iter().map(|(_, weight)| *weight).collect(),
    )
}

fn coefficients(density: f64, hardness: f64, flexibility: f64) -> [(&'static str, f64); 3] {
    [
        ("Density", density),
        ("Hardness", hardness),
        ("Flexibility", flexibility),
    ]
}

fn structural_parts() -> Vec<SpecDecl> {
    vec![
        SpecDecl::new("WPart")
            .label("weapon part")
            .base_type("weapon part"),
        SpecDecl::new("Handle")
            .extends("WPart")
            .label("handle")
            .size(3.0)
            .materials(ChoiceSpec::weighted_values(
                HANDLE_MATERIALS,
                HANDLE_MATERIAL_WEIGHTS.to_vec(),
            ))
            .attribute(
                "Wrapping",
                AttributeRule::new(
                    0,
                    1,
                    ChoiceSpec::weighted_values(
                        ["leather strips", "waxed cord", "silver wire", "sharkskin"],
                        vec![6.0, 4.0, 1.0, 1.0],
                    ),
                ),
            )
            .trait_rule("Grip", ChoiceSpec::values(["smooth", "ridged", "knurled"])),
        SpecDecl::new("HandleLong")
            .extends("Handle")
            .label("long handle")
            .size(6.0),
        SpecDecl::new("HandleLonger")
            .extends("Handle")
            .label("pole")
            .size(12.0),
        SpecDecl::new("Crossguard")
            .extends("WPart")
            .label("crossguard")
            .size(2.0)
            .materials(weapon_metals())
            .trait_rule("Quillons", ChoiceSpec::values(["straight", "swept", "recurved"])),
        SpecDecl::new("Roundguard")
            .extends("WPart")
            .label("round guard")
            .size(1.0)
            .materials(weapon_metals()),
    ]
}

fn decorations() -> Vec<SpecDecl> {
    vec![
        SpecDecl::new("Decoration")
            .label("decoration")
            .base_type("decoration")
            .size(1.0),
        SpecDecl::new("MetalPlating")
            .extends("Decoration")
            .label("metal plating")
            .materials(ChoiceSpec::weighted_values(PRECIOUS_METALS, vec![1.0, 2.0])),
        SpecDecl::new("MetalInlay")
            .extends("Decoration")
            .label("metal inlay")
            .size(0.5)
            .materials(ChoiceSpec::values(PRECIOUS_METALS))
            .trait_rule("Pattern", ChoiceSpec::values(["filigree", "knotwork", "geometric"])),
        SpecDecl::new("GemEncrust")
            .extends("Decoration")
            .label("encrusted gems")
            .size(0.5)
            .materials(ChoiceSpec::values(GEMS))
            .attribute(
                "Cut",
                AttributeRule::new(1, 1, ChoiceSpec::values(["cabochon", "faceted", "rose"])),
            ),
    ]
}

fn damaging_parts() -> Vec<SpecDecl> {
    let blade_additions = addition(&[
        (None, 5.0),
        (Some("MetalPlating"), 3.0),
        (Some("MetalInlay"), 1.0),
    ]);

    vec![
        SpecDecl::new("Damager")
            .extends("WPart")
            .label("weapon component")
            .size(10.0)
            .materials(weapon_metals())
            .damage(DamageDecl::default().base_speed(10.0).effectiveness(4.0)),
        // Blades
        SpecDecl::new("Blade")
            .extends("Damager")
            .label("typical blade")
            .size(8.0)
            .addition(blade_additions.clone())
            .attribute(
                "Engraving",
                AttributeRule::new(
                    0,
                    2,
                    ChoiceSpec::weighted_values(
                        ["runic script", "twisting vines", "a maker's mark", "a hunting scene"],
                        vec![3.0, 3.0, 4.0, 1.0],
                    ),
                ),
            )
            .damage(
                DamageDecl::default()
                    .table(Crush, coefficients(1.0, 0.5, -0.2))
                    .table(Pierce, coefficients(0.3, 1.0, 0.5))
                    .table(Slice, coefficients(0.2, 1.0, 1.0))
                    .base_speed(10.0)
                    .effectiveness(4.0)
                    .good(&[Slice]),
            ),
        SpecDecl::new("BladeBig")
            .extends("Blade")
            .label("great blade")
            .size(14.0)
            .damage(DamageDecl::default().base_speed(6.0).bad(&[Pierce])),
        SpecDecl::new("BladeCurved")
            .extends("Blade")
            .label("curved blade")
            .size(7.0)
            .damage(DamageDecl::default().base_speed(14.0).bad(&[Crush, Pierce])),
        SpecDecl::new("BladeCurvedBig")
            .extends("Blade")
            .label("great curved blade")
            .size(14.0)
            .damage(
                DamageDecl::default()
                    .base_speed(8.0)
                    .effectiveness(3.0)
                    .bad(&[Pierce]),
            ),
        SpecDecl::new("BladeSmall")
            .extends("Blade")
            .label("short blade")
            .size(4.0)
            .damage(DamageDecl::default().base_speed(16.0).bad(&[Crush])),
        SpecDecl::new("BladeCurvedSmall")
            .extends("Blade")
            .label("curved short blade")
            .size(4.0)
            .damage(DamageDecl::default().base_speed(18.0).bad(&[Crush, Pierce])),
        SpecDecl::new("Spike")
            .extends("Damager")
            .label("bladed point")
            .size(4.0)
            .addition(blade_additions)
            .damage(
                DamageDecl::default()
                    .table(Crush, coefficients(1.0, 0.5, -0.2))
                    .table(Pierce, coefficients(1.0, 2.0, 1.0))
                    .table(Slice, coefficients(0.2, 0.6, 0.7))
                    .base_speed(14.0)
                    .effectiveness(6.0)
                    .good(&[Pierce])
                    .bad(&[Crush, Slice]),
            ),
        // Heads
        SpecDecl::new("HeadClub")
            .extends("Damager")
            .label("club head")
            .size(5.0)
            .addition(addition(&[
                (None, 10.0),
                (Some("GemEncrust"), 1.0),
                (Some("MetalPlating"), 3.0),
                (Some("MetalInlay"), 5.0),
            ]))
            .damage(
                DamageDecl::default()
                    .table(Crush, coefficients(2.4, 0.1, 0.2))
                    .effectiveness(8.0)
                    .good(&[Crush]),
            ),
        SpecDecl::new("Sphere")
            .extends("HeadClub")
            .label("simple orb")
            .size(2.0)
            .addition(addition(&[(None, 10.0), (Some("GemEncrust"), 1.0)]))
            .damage(
                DamageDecl::default()
                    .table(Crush, coefficients(1.4, 0.2, 0.0))
                    .effectiveness(2.0),
            ),
        SpecDecl::new("HeadMace")
            .extends("HeadClub")
            .label("flanged head")
            .size(5.0)
            .damage(
                DamageDecl::default()
                    .table(Crush, coefficients(2.1, 0.1, 0.2))
                    .table(Slice, coefficients(0.4, 0.3, 0.1))
                    .effectiveness(9.0),
            ),
        SpecDecl::new("HeadStar")
            .extends("HeadClub")
            .label("spiked head")
            .size(5.0)
            .damage(
                DamageDecl::default()
                    .table(Crush, coefficients(2.1, 0.1, 0.2))
                    .table(Pierce, coefficients(1.0, 0.3, 0.1))
                    .effectiveness(9.0),
            ),
        SpecDecl::new("HeadAxe")
            .extends("Damager")
            .label("crescent blade")
            .size(7.0)
            .addition(addition(&[(None, 5.0), (Some("MetalInlay"), 1.0)]))
            .damage(
                DamageDecl::default()
                    .table(Crush, coefficients(0.8, 0.1, -0.2))
                    .table(Slice, coefficients(1.0, 1.2, 0.6))
                    .effectiveness(4.0)
                    .good(&[Crush, Slice]),
            ),
        SpecDecl::new("HeadHalberd")
            .extends("HeadAxe")
            .label("spiked crescent blade")
            .size(8.0)
            .damage(
                DamageDecl::default()
                    .table(Crush, coefficients(0.8, 0.1, -0.2))
                    .table(Pierce, coefficients(0.5, 1.0, 0.5))
                    .table(Slice, coefficients(1.0, 1.2, 0.6))
                    .effectiveness(3.0),
            ),
    ]
}

/// A weapon family root: base type "weapon" with the given damager slot.
fn family(name: &str, label: &str, damager: &str) -> SpecDecl {
    SpecDecl::new(name)
        .extends("Weapon")
        .label(label)
        .damager(damager)
}

fn sword_like(name: &str, label: &str, blade: &str, guard: Option<&str>, handle: &str) -> SpecDecl {
    let decl = SpecDecl::new(name)
        .extends("Sword")
        .label(label)
        .component("Blade", ComponentRule::fixed(blade))
        .component("Handle", ComponentRule::fixed(handle))
        .component("Pommel", ComponentRule::fixed("Sphere"));
    match guard {
        Some(guard) => decl.component("Guard", ComponentRule::fixed(guard)),
        None => decl,
    }
}

fn hafted(
    name: &str,
    extends: &str,
    label: &str,
    slot: &str,
    head: &str,
    handle: &str,
) -> SpecDecl {
    SpecDecl::new(name)
        .extends(extends)
        .label(label)
        .component(slot, ComponentRule::fixed(head))
        .component("Handle", ComponentRule::fixed(handle))
        .component("Counterweight", ComponentRule::one_of([None, Some("Sphere")]))
}

fn weapons() -> Vec<SpecDecl> {
    vec![
        SpecDecl::new("Weapon")
            .label("Generic Weapon")
            .base_type("weapon"),
        // Swords and knives
        family("Sword", "Sword", "Blade")
            .component("Blade", ComponentRule::fixed("Blade"))
            .component(
                "Guard",
                ComponentRule::one_of([Some("Crossguard"), Some("Roundguard")]),
            )
            .component("Handle", ComponentRule::fixed("Handle"))
            .component("Pommel", ComponentRule::fixed("Sphere")),
        sword_like("Greatsword", "Greatsword", "BladeBig", Some("Crossguard"), "HandleLong"),
        sword_like("Falchion", "Falchion", "BladeCurved", Some("Roundguard"), "Handle"),
        sword_like(
            "GreatswordCurved",
            "Curved Greatsword",
            "BladeCurvedBig",
            Some("Crossguard"),
            "HandleLong",
        ),
        sword_like("Dagger", "Dagger", "BladeSmall", Some("Roundguard"), "Handle"),
        sword_like(
            "DaggerCurved",
            "Curved Dagger",
            "BladeCurvedSmall",
            Some("Roundguard"),
            "Handle",
        ),
        sword_like("Stiletto", "Stiletto", "Spike", None, "Handle"),
        SpecDecl::new("Glaive")
            .extends("Sword")
            .label("Glaive")
            .component("Blade", ComponentRule::fixed("BladeCurved"))
            .component("Handle", ComponentRule::fixed("HandleLonger"))
            .component("Counterweight", ComponentRule::fixed("Sphere")),
        // Bludgeons
        hafted("Club", "Weapon", "Club", "Head", "HeadClub", "HandleLong").damager("Head"),
        hafted("Mace", "Club", "Mace", "Head", "HeadMace", "HandleLong"),
        hafted("MaceCav", "Club", "Cavalry Mace", "Head", "HeadMace", "HandleLonger"),
        hafted("Star", "Club", "Star", "Head", "HeadStar", "HandleLong"),
        // Cleavers
        hafted("Axe", "Weapon", "Axe", "Head", "HeadAxe", "HandleLong").damager("Head"),
        hafted("Halberd", "Axe", "Halberd", "Head", "HeadHalberd", "HandleLonger"),
        // Points
        hafted("Pike", "Weapon", "Pike", "Point", "Spike", "HandleLonger").damager("Point"),
    ]
}

/// Every built-in declaration.
pub fn standard_decls() -> Vec<SpecDecl> {
    let mut decls = structural_parts();
    decls.extend(decorations());
    decls.extend(damaging_parts());
    decls.extend(weapons());
    decls
}

pub const SWORDS: [&str; 4] = ["Sword", "Falchion", "Greatsword", "GreatswordCurved"];
pub const KNIVES: [&str; 3] = ["Dagger", "DaggerCurved", "Stiletto"];
pub const BLUDGEONS: [&str; 3] = ["Club", "Mace", "Star"];
pub const CLEAVERS: [&str; 1] = ["Axe"];
pub const POLEARMS: [&str; 4] = ["Glaive", "MaceCav", "Halberd", "Pike"];
