//! Lua scripts for multi-step operations that must be atomic on the server.

/// Admit-or-enqueue in one round trip.
///
/// KEYS[1] = active set
/// KEYS[2] = waiting line
/// ARGV[1] = token
/// ARGV[2] = capacity
/// ARGV[3] = arrival score
///
/// Returns:
///   1 = admitted
///   0 = queued
pub const ADMIT_SCRIPT: &str = r#"
    local active_key = KEYS[1]
    local waiting_key = KEYS[2]
    local token = ARGV[1]
    local capacity = tonumber(ARGV[2])
    local score = ARGV[3]

    if redis.call('SCARD', active_key) < capacity then
        redis.call('SADD', active_key, token)
        return 1
    end

    redis.call('ZADD', waiting_key, score, token)
    return 0
"#;

/// Move a token from the waiting line into the active set.
///
/// KEYS[1] = waiting line
/// KEYS[2] = active set
/// ARGV[1] = token
///
/// Returns 1 if this call removed the token from the line, 0 otherwise.
pub const TRANSFER_SCRIPT: &str = r#"
    local waiting_key = KEYS[1]
    local active_key = KEYS[2]
    local token = ARGV[1]

    if redis.call('ZREM', waiting_key, token) == 1 then
        redis.call('SADD', active_key, token)
        return 1
    end
    return 0
"#;
