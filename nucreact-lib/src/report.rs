use crate::reaction::Reaction;

/// One console line of a Q-value summary: `<label> Q-value:  7161.920 keV`.
///
/// Non-negative values carry a leading space so that signs line up.
pub fn q_value_line(label: &str, q_value: f64) -> String {
    let sign = if q_value.is_sign_negative() { "" } else { " " };
    format!("{label} Q-value: {sign}{q_value:.3} keV")
}

/// Q-value lines for ground-state reactions, in order.
pub fn q_value_summary(reactions: &[Reaction]) -> Vec<String> {
    reactions
        .iter()
        .map(|r| q_value_line(&r.to_string(), r.q_value(0.0)))
        .collect()
}

/// Short label for a recoil excitation: `g.s.` or the energy in keV.
pub fn state_label(recoil_ex: f64) -> String {
    if recoil_ex == 0.0 {
        "g.s.".to_string()
    } else {
        format!("{recoil_ex}")
    }
}
