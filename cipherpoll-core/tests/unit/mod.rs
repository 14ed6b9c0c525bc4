mod notifier;
mod verification_state;
