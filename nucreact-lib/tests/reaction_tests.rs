use approx::assert_relative_eq;
use nucreact::constants::NEUTRON_MASS_KEV;
use nucreact::kinematics::{ejectile_lab_energy_one, is_kinematically_allowed_one};
use nucreact::report::q_value_summary;
use nucreact::{Curve, Ejectile, MassTable, NucReactError, Reaction, linspace};

fn table() -> MassTable {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../data/nist_isotope_mass.txt");
    MassTable::load(path).unwrap()
}

#[test]
fn test_parse_capture() {
    let table = table();
    let r = Reaction::parse("12C(a,g)16O", &table).unwrap();
    assert!(r.is_capture());
    assert_eq!(r.target.mass_number, 12);
    assert_eq!(r.projectile.symbol, "He");
    assert_eq!(r.recoil.atomic_number, 8);
    assert_relative_eq!(r.q_value(0.0), 7161.918, epsilon = 0.01);
}

#[test]
fn test_parse_aliases_and_explicit_nuclides() {
    let table = table();
    let short = Reaction::parse("13C(a,n)16O", &table).unwrap();
    let long = Reaction::parse(" 13C( 4He , 1n )16O ", &table).unwrap();
    assert_eq!(short, long);
    let greek = Reaction::parse("12C(α,γ)16O", &table).unwrap();
    assert!(greek.is_capture());
    assert_eq!(short.ejectile, Ejectile::Particle(nucreact::neutron()));
}

#[test]
fn test_display_roundtrip() {
    let table = table();
    for notation in [
        "12C(a,g)16O",
        "13C(a,n)16O",
        "79Br(n,p)79Se",
        "81Br(n,a)78As",
        "2H(d,p)3H",
    ] {
        let r = Reaction::parse(notation, &table).unwrap();
        assert_eq!(r.to_string(), notation);
    }
}

#[test]
fn test_parse_rejects_unbalanced() {
    let table = table();
    assert!(matches!(
        Reaction::parse("13C(a,p)16O", &table),
        Err(NucReactError::InvalidReaction(_))
    ));
    assert!(matches!(
        Reaction::parse("12C(a,n)16O", &table),
        Err(NucReactError::InvalidReaction(_))
    ));
}

#[test]
fn test_parse_rejects_bad_syntax() {
    let table = table();
    for bad in ["13C a,n 16O", "13C(a n)16O", "13C)a,n(16O", "C(a,n)16O", "(a,n)16O"] {
        assert!(
            matches!(
                Reaction::parse(bad, &table),
                Err(NucReactError::InvalidReaction(_))
            ),
            "{bad}"
        );
    }
    assert!(matches!(
        Reaction::parse("12C(g,a)8Be", &table),
        Err(NucReactError::InvalidReaction(_))
    ));
}

#[test]
fn test_parse_unknown_isotope() {
    let table = table();
    assert!(matches!(
        Reaction::parse("56Fe(n,p)56Mn", &table),
        Err(NucReactError::UnknownIsotope { .. })
    ));
}

#[test]
fn test_neutron_uses_fixed_mass() {
    let table = table();
    let r = Reaction::parse("79Br(n,p)79Se", &table).unwrap();
    assert_eq!(r.projectile.mass_kev, NEUTRON_MASS_KEV);
}

#[test]
fn test_study_q_values() {
    let table = table();
    let reactions: Vec<Reaction> = [
        "12C(a,g)16O",
        "13C(a,n)16O",
        "79Br(n,p)79Se",
        "81Br(n,p)81Se",
        "79Br(n,a)76As",
        "81Br(n,a)78As",
    ]
    .iter()
    .map(|n| Reaction::parse(n, &table).unwrap())
    .collect();

    let expected = [7161.918, 2215.614, 631.729, -804.272, 1869.729, 487.504];
    for (r, q) in reactions.iter().zip(expected) {
        assert_relative_eq!(r.q_value(0.0), q, epsilon = 0.01);
    }

    let lines = q_value_summary(&reactions);
    assert_eq!(lines[0], "12C(a,g)16O Q-value:  7161.918 keV");
    assert_eq!(lines[3], "81Br(n,p)81Se Q-value: -804.272 keV");
}

#[test]
fn test_threshold() {
    let table = table();
    let exo = Reaction::parse("13C(a,n)16O", &table).unwrap();
    assert_eq!(exo.threshold(0.0), 0.0);
    // The 6130 keV state lies above the ground-state Q-value.
    assert!(exo.threshold(6130.0) > 6130.0 - 2215.6);
}

#[test]
fn test_ejectile_curve_ground_state_keeps_grid() {
    let table = table();
    let r = Reaction::parse("13C(a,n)16O", &table).unwrap();
    let grid = linspace(4000.0, 9000.0, 1000).unwrap();
    for angle in [45.0, 90.0, 135.0] {
        let curve = r.ejectile_curve(&grid, angle, 0.0);
        assert_eq!(curve.len(), grid.len());
        assert_eq!(curve.lab_energy(), grid.as_slice());
    }
}

#[test]
fn test_ejectile_curve_excited_state_filters_low_energies() {
    let table = table();
    let r = Reaction::parse("13C(a,n)16O", &table).unwrap();
    let grid = linspace(4000.0, 9000.0, 1000).unwrap();
    let curve = r.ejectile_curve(&grid, 90.0, 6130.0);
    assert!(!curve.is_empty());
    assert!(curve.len() < grid.len());
    // Dropped points are the low-energy ones.
    let first = curve.lab_energy()[0];
    assert!(first > grid[0]);
    assert_eq!(*curve.lab_energy().last().unwrap(), 9000.0);

    let (mp, mt, me, mr) = (
        r.projectile.mass_kev,
        r.target.mass_kev,
        r.ejectile.mass_kev(),
        r.recoil.mass_kev,
    );
    for (e, value) in curve.points() {
        assert!(is_kinematically_allowed_one(e, 90.0, mp, mt, me, mr, 6130.0));
        let expected = ejectile_lab_energy_one(e, 90.0, mp, mt, me, mr, 6130.0).forward;
        assert_eq!(value, expected);
    }
}

#[test]
fn test_capture_curve() {
    let table = table();
    let r = Reaction::parse("12C(a,g)16O", &table).unwrap();
    let grid = linspace(4000.0, 9000.0, 11).unwrap();
    let gs = r.ejectile_curve(&grid, 0.0, 0.0);
    let ex = r.ejectile_curve(&grid, 90.0, 6917.0);
    assert_eq!(gs.len(), 11);
    assert_eq!(ex.len(), 11);
    for ((_, g), (_, x)) in gs.points().zip(ex.points()) {
        assert!(g > x);
    }
    // E_gamma rises with the beam energy.
    assert!(gs.values().windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn test_chained_curve_keeps_primary_energies() {
    let table = table();
    let primary = Reaction::parse("13C(a,n)16O", &table).unwrap();
    let secondary = Reaction::parse("79Br(n,p)79Se", &table).unwrap();
    let grid = linspace(4000.0, 9000.0, 200).unwrap();

    let neutrons = primary.ejectile_curve(&grid, 45.0, 0.0);
    let protons = secondary.through(&neutrons, 0.0, 0.0);
    assert_eq!(protons.len(), neutrons.len());
    assert_eq!(protons.lab_energy(), grid.as_slice());
    for ((_, en), (_, ep)) in neutrons.points().zip(protons.points()) {
        // Exothermic: the proton leaves with more than the neutron brought in.
        assert!(ep > en);
    }
}

#[test]
fn test_chained_endothermic_drops_points() {
    let table = table();
    let primary = Reaction::parse("13C(a,n)16O", &table).unwrap();
    let secondary = Reaction::parse("81Br(n,p)81Se", &table).unwrap();
    let grid = linspace(0.0, 9000.0, 400).unwrap();

    let neutrons = primary.ejectile_curve(&grid, 135.0, 6130.0);
    let protons = secondary.through(&neutrons, 0.0, 0.0);
    assert!(protons.len() < neutrons.len());
    let threshold = secondary.threshold(0.0);
    let neutron_at: Vec<(f64, f64)> = neutrons.points().collect();
    for (lab, _) in protons.points() {
        let (_, en) = neutron_at.iter().find(|(l, _)| *l == lab).unwrap();
        assert!(*en >= threshold);
    }
}

#[test]
fn test_chain_through_empty_curve() {
    let table = table();
    let secondary = Reaction::parse("79Br(n,p)79Se", &table).unwrap();
    assert!(secondary.through(&Curve::default(), 0.0, 0.0).is_empty());
}

#[test]
fn test_curve_record() {
    let table = table();
    let r = Reaction::parse("12C(a,g)16O", &table).unwrap();
    let curve = r.ejectile_curve(&[5000.0, 6000.0], 0.0, 0.0);
    let record = curve.to_record(&r.to_string());
    assert_eq!(record.label, "12C(a,g)16O");
    assert_eq!(record.lab_energy, vec![5000.0, 6000.0]);
    assert_eq!(record.values.len(), 2);
}
