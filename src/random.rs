use crate::prelude::*;

/// Generates a complete automaton with `size` states over the first
/// `symbols` letters of the alphabet. Acceptance and all transitions are
/// drawn uniformly, so the result may have unreachable states and usually
/// collapses to fewer language classes.
pub fn random_dfa(symbols: usize, size: usize) -> DFA {
    assert!(size > 0, "automaton needs at least one state");
    let alphabet = CharAlphabet::of_size(symbols);
    let mut dfa = DFA::for_alphabet(alphabet.clone());
    dfa.add_initial_state(fastrand::bool());
    for _ in 1..size {
        dfa.add_state(fastrand::bool());
    }
    for state in dfa.state_indices() {
        for position in 0..alphabet.size() {
            dfa.set_transition(state, alphabet[position], fastrand::usize(..size));
        }
    }
    dfa
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_dfas_are_complete() {
        fastrand::seed(42);
        for _ in 0..10 {
            let dfa = random_dfa(3, 5);
            assert_eq!(dfa.size(), 5);
            assert_eq!(dfa.alphabet().size(), 3);
            for state in dfa.state_indices() {
                for symbol in dfa.alphabet().universe() {
                    assert!(dfa.successor(state, symbol).is_some());
                }
            }
        }
    }
}
