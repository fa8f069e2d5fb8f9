use nusa_geo::{FeatureCollection, GeometryBuilder};
use nusa_geom::{Ray, Rgb, Vec3};
use nusa_regions::{HOVER_EMISSIVE, RegionId, load_regions, palette_color};
use proptest::prelude::*;

fn square(lon: f64, lat: f64) -> String {
    format!(
        "[[[{a},{b}],[{c},{b}],[{c},{d}],[{a},{d}],[{a},{b}]]]",
        a = lon,
        b = lat,
        c = lon + 1.0,
        d = lat + 1.0
    )
}

fn collection() -> FeatureCollection {
    let json = format!(
        r#"{{"type":"FeatureCollection","features":[
            {{"type":"Feature","properties":{{"Propinsi":"Aceh"}},"geometry":{{"type":"Polygon","coordinates":{}}}}},
            {{"type":"Feature","properties":{{"name":"Province 2"}},"geometry":{{"type":"Polygon","coordinates":{}}}}},
            {{"type":"Feature","properties":{{}},"geometry":{{"type":"Polygon","coordinates":[[]]}}}},
            {{"type":"Feature","properties":{{}},"geometry":{{"type":"Polygon","coordinates":{}}}}}
        ]}}"#,
        square(100.0, 2.0),
        square(104.0, 2.0),
        square(108.0, 2.0),
    );
    FeatureCollection::from_json_str(&json).expect("collection")
}

#[test]
fn three_valid_features_and_one_empty_ring_give_three_regions() {
    let names = ["Aceh", "Sumatera Utara", "Sumatera Barat", "Riau"];
    let reg = load_regions(&collection(), &GeometryBuilder::default(), |i| {
        names.get(i).copied()
    });
    assert_eq!(reg.len(), 3);
    assert_eq!(reg.feature_count(), 4);
    assert_eq!(reg.labels().len(), 3);
    let got: Vec<_> = reg.all().iter().map(|r| (r.feature_index, r.name.as_str())).collect();
    assert_eq!(
        got,
        vec![(0, "Aceh"), (1, "Sumatera Utara"), (3, "Riau")]
    );
    for r in reg.all() {
        assert_eq!(r.base_color, palette_color(r.feature_index));
        assert_eq!(r.material.emissive, Rgb::BLACK);
    }
}

#[test]
fn anchor_sits_inside_the_region() {
    let reg = load_regions(&collection(), &GeometryBuilder::default(), |_| None);
    for r in reg.all() {
        let above = Vec3::new(r.anchor.x, 10.0, r.anchor.z);
        let hit = reg.pick(&Ray::new(above, Vec3::new(0.0, -1.0, 0.0)));
        assert_eq!(hit.map(|h| h.region), Some(r.id));
    }
}

proptest! {
    // Whatever the hover sequence, only the hovered region and (possibly)
    // the selected one carry the highlight.
    #[test]
    fn highlight_only_on_hovered_or_selected(
        ops in prop::collection::vec(prop::option::of(0u32..3), 1..40),
        selected in prop::option::of(0u32..3),
    ) {
        let mut reg = load_regions(&collection(), &GeometryBuilder::default(), |_| None);
        reg.set_selected(selected.map(RegionId));
        for op in ops {
            reg.set_hovered(op.map(RegionId));
            for r in reg.all() {
                let lit = r.material.emissive == HOVER_EMISSIVE;
                if lit {
                    prop_assert!(Some(r.id) == reg.hovered() || Some(r.id) == reg.selected());
                }
                if Some(r.id) == reg.hovered() {
                    prop_assert!(lit);
                }
            }
        }
    }
}
