mod catch_fault;
